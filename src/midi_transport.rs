use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::AsyncWriteExt,
    net::TcpStream,
    sync::mpsc::{Receiver, Sender, channel, error::TrySendError},
    task::JoinHandle,
};

use crate::{dlive_message::MidiFrame, error::AppError};

const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);
const QUEUE_SIZE: usize = 64;

/// Destination of encoded frames. One call writes one whole frame.
pub trait MidiSink {
    fn is_available(&self) -> bool;

    fn send(&mut self, frame: &[u8]) -> Result<(), AppError>;
}

/// Outcome of handing the frames of one command to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub total: usize,
}

/// Sends every frame in order. Failures are logged and the remaining frames are still tried.
pub fn dispatch(sink: &mut dyn MidiSink, frames: &[MidiFrame]) -> DispatchReport {
    let total = frames.len();
    if !sink.is_available() {
        log::error!("no midi socket, dropping {} frame(s)", total);
        return DispatchReport { sent: 0, total };
    }
    let mut sent = 0;
    for frame in frames {
        match sink.send(frame) {
            Ok(()) => sent += 1,
            Err(e) => log::error!("MIDI send error: {}; frame={}", e, hex::encode(frame)),
        }
    }
    return DispatchReport { sent, total };
}

// TCP sink /////////////////////////////////////////////////////////////////

/// Handle to the writer task owning the connection to the mixrack
#[derive(Clone)]
pub struct TcpMidiSink {
    frame_tx: Sender<MidiFrame>,
    connected: Arc<AtomicBool>,
}

impl MidiSink for TcpMidiSink {
    fn is_available(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn send(&mut self, frame: &[u8]) -> Result<(), AppError> {
        if !self.is_available() {
            return Err(AppError::no_sink());
        }
        return match self.frame_tx.try_send(frame.to_vec()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(AppError::transport("send queue is full")),
            Err(TrySendError::Closed(_)) => Err(AppError::transport("writer has stopped")),
        };
    }
}

pub fn start(host: String, port: u16) -> (TcpMidiSink, JoinHandle<()>) {
    let (frame_tx, frame_rx) = channel(QUEUE_SIZE);
    let connected = Arc::new(AtomicBool::new(false));
    let writer_connected = connected.clone();
    let handle = tokio::spawn(async move {
        let mut writer = Writer::new(host, port, writer_connected);
        writer.run(frame_rx).await;
    });
    return (
        TcpMidiSink {
            frame_tx,
            connected,
        },
        handle,
    );
}

struct Writer {
    host: String,
    port: u16,
    connected: Arc<AtomicBool>,
}

impl Writer {
    fn new(host: String, port: u16, connected: Arc<AtomicBool>) -> Self {
        Self {
            host,
            port,
            connected,
        }
    }

    async fn run(&mut self, mut frame_rx: Receiver<MidiFrame>) {
        loop {
            let mut stream = match TcpStream::connect((self.host.as_str(), self.port)).await {
                Ok(stream) => stream,
                Err(e) => {
                    log::warn!(
                        "Connection to {}:{} failed: {}; retrying in {:?}",
                        self.host,
                        self.port,
                        e,
                        RECONNECT_INTERVAL
                    );
                    tokio::time::sleep(RECONNECT_INTERVAL).await;
                    continue;
                }
            };
            if let Err(e) = stream.set_nodelay(true) {
                log::debug!("set_nodelay failed: {}", e);
            }
            log::info!("Connected to mixrack at {}:{}", self.host, self.port);
            self.connected.store(true, Ordering::Release);

            loop {
                let Some(frame) = frame_rx.recv().await else {
                    log::debug!("All sinks dropped, closing connection");
                    self.connected.store(false, Ordering::Release);
                    return;
                };
                log::debug!("sending midi: {}", hex::encode(&frame));
                if let Err(e) = stream.write_all(&frame).await {
                    log::error!("MIDI send error: {}", e);
                    self.connected.store(false, Ordering::Release);
                    let mut dropped = 0;
                    while frame_rx.try_recv().is_ok() {
                        dropped += 1;
                    }
                    if dropped > 0 {
                        log::warn!("Dropped {} queued frame(s)", dropped);
                    }
                    tokio::time::sleep(RECONNECT_INTERVAL).await;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use tokio::{io::AsyncReadExt, net::TcpListener};

    struct RecordingSink {
        available: bool,
        fail_at: Option<usize>,
        calls: usize,
        frames: Vec<MidiFrame>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                available: true,
                fail_at: None,
                calls: 0,
                frames: Vec::new(),
            }
        }
    }

    impl MidiSink for RecordingSink {
        fn is_available(&self) -> bool {
            self.available
        }

        fn send(&mut self, frame: &[u8]) -> Result<(), AppError> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_at == Some(call) {
                return Err(AppError::transport("broken pipe"));
            }
            self.frames.push(frame.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_keeps_order() {
        let mut sink = RecordingSink::new();
        let frames = vec![vec![1, 2], vec![3], vec![4, 5, 6]];
        let report = dispatch(&mut sink, &frames);
        assert_eq!(report, DispatchReport { sent: 3, total: 3 });
        assert_eq!(sink.frames, frames);
    }

    #[test]
    fn test_dispatch_continues_after_failure() {
        let mut sink = RecordingSink::new();
        sink.fail_at = Some(1);
        let frames = vec![vec![1], vec![2], vec![3], vec![4]];
        let report = dispatch(&mut sink, &frames);
        assert_eq!(report, DispatchReport { sent: 3, total: 4 });
        assert_eq!(sink.calls, 4);
        assert_eq!(sink.frames, vec![vec![1], vec![3], vec![4]]);
    }

    #[test]
    fn test_dispatch_without_sink() {
        let mut sink = RecordingSink::new();
        sink.available = false;
        let report = dispatch(&mut sink, &vec![vec![1], vec![2]]);
        assert_eq!(report, DispatchReport { sent: 0, total: 2 });
        assert_eq!(sink.calls, 0);
    }

    #[tokio::test]
    async fn test_tcp_sink_writes_frames() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (mut sink, _handle) = start("127.0.0.1".to_string(), port);
        let (mut peer, _) = listener.accept().await.unwrap();

        for _ in 0..100 {
            if sink.is_available() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(sink.is_available());

        let frames = vec![vec![0x90, 0x00, 0x7F, 0x00, 0x00], vec![0xB0, 0x77, 0x7F]];
        let report = dispatch(&mut sink, &frames);
        assert_eq!(report.sent, 2);

        let mut received = vec![0u8; 8];
        peer.read_exact(&mut received).await.unwrap();
        assert_eq!(received, vec![0x90, 0x00, 0x7F, 0x00, 0x00, 0xB0, 0x77, 0x7F]);
    }

    #[tokio::test]
    async fn test_tcp_sink_waits_before_reconnecting() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (mut sink, handle) = start("127.0.0.1".to_string(), port);
        let (peer, _) = listener.accept().await.unwrap();
        drop(peer);

        // keep writing until the closed peer makes a write fail
        for _ in 0..200 {
            if sink.is_available() {
                let _ = sink.send(&[0xB0, 0x77, 0x7F]);
            } else {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!sink.is_available());

        let reconnect = tokio::time::timeout(Duration::from_millis(500), listener.accept()).await;
        assert!(reconnect.is_err());
        handle.abort();
    }

    #[tokio::test]
    async fn test_tcp_sink_unavailable_before_connect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let (mut sink, handle) = start("127.0.0.1".to_string(), port);
        let Err(e) = sink.send(&[0xB0, 0x77, 0x7F]) else {
            panic!();
        };
        assert_eq!(e.error_type, ErrorType::NoSinkAvailable);
        handle.abort();
    }
}
