use tokio::{
    sync::{
        mpsc::{Receiver, Sender, channel},
        oneshot,
    },
    task::JoinHandle,
};

use crate::{
    command::Command,
    dlive_message::{CommandEncoder, MidiFrame},
    error::AppError,
    midi_transport::{DispatchReport, MidiSink, dispatch},
};

#[derive(Debug)]
pub struct Request {
    pub command: Command,
    pub resp: oneshot::Sender<Result<Dispatched, AppError>>,
}

/// Frames built for a command and how many of them reached the sink
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub frames: Vec<MidiFrame>,
    pub report: DispatchReport,
}

pub fn start<S>(encoder: CommandEncoder, sink: S) -> (Sender<Request>, JoinHandle<()>)
where
    S: MidiSink + Send + 'static,
{
    let (request_tx, request_rx) = channel(8);
    let handle = tokio::spawn(async move {
        let mut mixer_control = MixerControl::new(encoder, sink);
        mixer_control.handle_requests(request_rx).await;
    });
    return (request_tx, handle);
}

struct MixerControl<S: MidiSink> {
    encoder: CommandEncoder,
    sink: S,
}

impl<S: MidiSink> MixerControl<S> {
    fn new(encoder: CommandEncoder, sink: S) -> Self {
        Self { encoder, sink }
    }

    async fn handle_requests(&mut self, mut request_rx: Receiver<Request>) {
        while let Some(request) = request_rx.recv().await {
            let response = self.handle_command(&request.command);
            if request.resp.send(Ok(response)).is_err() {
                log::debug!("Requester has gone: {}", request.command);
            }
        }
        log::debug!("Mixer control stopped");
    }

    // All frames of a command are queued without yielding in between
    fn handle_command(&mut self, command: &Command) -> Dispatched {
        let frames = self.encoder.encode(command);
        log::info!("{}", command);
        let report = dispatch(&mut self.sink, &frames);
        if report.sent < report.total {
            log::warn!(
                "{}: sent {} of {} frame(s)",
                command,
                report.sent,
                report.total
            );
        }
        return Dispatched { frames, report };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        command::ChannelRef,
        dlive::topology::ChannelType,
    };

    #[derive(Clone)]
    struct SharedSink {
        available: bool,
        frames: Arc<Mutex<Vec<MidiFrame>>>,
    }

    impl MidiSink for SharedSink {
        fn is_available(&self) -> bool {
            self.available
        }

        fn send(&mut self, frame: &[u8]) -> Result<(), AppError> {
            self.frames.lock().unwrap().push(frame.to_vec());
            Ok(())
        }
    }

    async fn request(request_tx: &Sender<Request>, command: Command) -> Dispatched {
        let (resp_tx, resp_rx) = oneshot::channel();
        request_tx
            .send(Request {
                command,
                resp: resp_tx,
            })
            .await
            .unwrap();
        resp_rx.await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_commands_are_sent_in_order() {
        let sink = SharedSink {
            available: true,
            frames: Arc::new(Mutex::new(Vec::new())),
        };
        let (request_tx, _handle) = start(CommandEncoder::new(0).unwrap(), sink.clone());
        let channel = ChannelRef::new(ChannelType::Input, 0).unwrap();

        let dispatched = request(&request_tx, Command::Mute { channel, on: true }).await;
        assert_eq!(dispatched.report, DispatchReport { sent: 1, total: 1 });
        let dispatched = request(&request_tx, Command::SceneRecall { scene: 1 }).await;
        assert_eq!(dispatched.frames, vec![vec![0xB0, 0x00, 0x00, 0xC0, 0x01]]);

        let frames = sink.frames.lock().unwrap().clone();
        assert_eq!(
            frames,
            vec![
                vec![0x90, 0x00, 0x7F, 0x00, 0x00],
                vec![0xB0, 0x00, 0x00, 0xC0, 0x01]
            ]
        );
    }

    #[tokio::test]
    async fn test_command_dropped_without_sink() {
        let sink = SharedSink {
            available: false,
            frames: Arc::new(Mutex::new(Vec::new())),
        };
        let (request_tx, _handle) = start(CommandEncoder::new(0).unwrap(), sink.clone());
        let dispatched = request(&request_tx, Command::SceneRecall { scene: 3 }).await;
        assert_eq!(dispatched.report, DispatchReport { sent: 0, total: 1 });
        assert!(sink.frames.lock().unwrap().is_empty());
    }
}
