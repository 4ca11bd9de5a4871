pub mod spec;

use std::cmp::max;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    sync::{mpsc::Sender, oneshot},
    task::JoinHandle,
};

use crate::{
    actions::{self, ActionDef},
    error::{AppError, ErrorType},
    mixer_control::{Dispatched, Request},
    user_session::spec::{Spec, Value},
};

pub async fn start(
    listen_address: &str,
    request_tx: Sender<Request>,
) -> std::io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(listen_address).await?;
    let address = listen_address.to_string();
    let handle = tokio::spawn(async move {
        log::info!("Listening on {}", address);
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    log::debug!("Session opened from {}", peer);
                    start_session(stream, request_tx.clone());
                }
                Err(e) => log::error!("User connection accept error: {:?}", e),
            }
        }
    });
    return Ok(handle);
}

fn start_session(stream: TcpStream, request_tx: Sender<Request>) {
    tokio::spawn(async move {
        let mut session = Session::new(stream, request_tx);
        if let Err(e) = session.run().await {
            log::warn!("Session ended: {}", e);
        }
    });
}

struct Session {
    stream: BufReader<TcpStream>,
    request_tx: Sender<Request>,
}

impl Session {
    pub fn new(stream: TcpStream, request_tx: Sender<Request>) -> Self {
        Self {
            stream: BufReader::new(stream),
            request_tx,
        }
    }

    pub async fn run(&mut self) -> std::io::Result<()> {
        self.stream
            .write_all(b"\r\n==========================\r\n welcome to dlive control\r\n==========================\r\n\r\n")
            .await?;

        loop {
            self.stream.write_all(b"dlive> ").await?;
            let mut line = String::new();
            match self.stream.read_line(&mut line).await? {
                0 => {
                    log::debug!("Connection closed");
                    return Ok(());
                }
                _ => {
                    let trimmed = line.trim().to_string();
                    log::debug!("Received: {}", trimmed);
                    let tokens: Vec<String> = tokenize(&trimmed);
                    if tokens.is_empty() {
                        continue;
                    }
                    let command = tokens[0].trim();
                    match command {
                        "help" | "actions" => self.help().await?,
                        "describe" => self.describe(command, &tokens).await?,
                        "quit" => {
                            self.stream.write_all(b"bye!\r\n").await?;
                            return Ok(());
                        }
                        _ => match actions::find_action(command) {
                            Some(action) => self.invoke(action, &tokens).await?,
                            None => {
                                let e = AppError::new(
                                    ErrorType::UserCommandUnknown,
                                    format!("{}: Unknown command", command),
                                );
                                log::debug!("{}", e);
                                self.stream
                                    .write_all(format!("{}\r\n", e.message).as_bytes())
                                    .await?;
                            }
                        },
                    }
                }
            }
        }
    }

    async fn help(&mut self) -> std::io::Result<()> {
        let usages: Vec<(String, &str)> = actions::ACTIONS
            .iter()
            .map(|action| (action.usage(), action.description))
            .collect();
        let longest = usages.iter().fold(0, |acc, (usage, _)| max(acc, usage.len()));

        let mut lines = Vec::<String>::new();
        lines.push("".to_string());
        for (usage, description) in usages {
            lines.push(format!("  {:width$}  {}", usage, description, width = longest));
        }
        lines.push("".to_string());
        lines.push("  describe <action>  quit".to_string());
        lines.push("".to_string());
        self.stream
            .write_all(format!("{}\r\n", lines.join("\r\n")).as_bytes())
            .await?;
        return Ok(());
    }

    async fn describe(&mut self, command: &str, tokens: &Vec<String>) -> std::io::Result<()> {
        let specs = vec![Spec::str("action", true)];
        let Some(params) = self.parse_params(command, tokens, &specs).await? else {
            return Ok(());
        };
        let name = match params[0].as_text() {
            Ok(name) => name,
            Err(e) => return self.write_error(&e).await,
        };
        let Some(action) = actions::find_action(&name) else {
            let e = AppError::new(
                ErrorType::UserCommandInvalidRequest,
                format!("No such action: {}", name),
            );
            return self.write_error(&e).await;
        };

        let longest = action
            .params
            .iter()
            .fold(0, |acc, spec| max(acc, spec.name.len()));
        let mut lines = Vec::<String>::new();
        lines.push(format!("{}: {}", action.usage(), action.description));
        for spec in &action.params {
            let hint = spec.hint.clone().unwrap_or_default();
            lines.push(format!("  {:width$} : {}", spec.name, hint, width = longest));
        }
        self.stream
            .write_all(format!("{}\r\n", lines.join("\r\n")).as_bytes())
            .await?;
        return Ok(());
    }

    async fn invoke(&mut self, action: &ActionDef, tokens: &Vec<String>) -> std::io::Result<()> {
        let Some(params) = self.parse_params(action.name, tokens, &action.params).await? else {
            return Ok(());
        };
        let command = match (action.build)(&params) {
            Ok(command) => command,
            Err(e) => return self.write_error(&e).await,
        };

        let (resp_tx, resp_rx) = oneshot::channel();
        let request = Request {
            command,
            resp: resp_tx,
        };
        if self.request_tx.send(request).await.is_err() {
            return self
                .write_error(&AppError::runtime("mixer control has stopped"))
                .await;
        }
        return self
            .wait_and_handle_response(resp_rx, |dispatched: Dispatched| {
                let mut lines: Vec<String> = dispatched
                    .frames
                    .iter()
                    .map(|frame| format!("  {}", hex::encode(frame)))
                    .collect();
                let status = if dispatched.report.sent == dispatched.report.total {
                    "ok".to_string()
                } else if dispatched.report.sent == 0 {
                    "not sent; no connection to the mixrack".to_string()
                } else {
                    "partially sent; see the log".to_string()
                };
                lines.push(format!(
                    "{} ({}/{} frame(s))",
                    status, dispatched.report.sent, dispatched.report.total
                ));
                return lines.join("\r\n");
            })
            .await;
    }

    // Utilities ////////////////////////////////////////////////////////////////

    async fn parse_params(
        &mut self,
        command: &str,
        tokens: &Vec<String>,
        specs: &Vec<Spec>,
    ) -> std::io::Result<Option<Vec<Value>>> {
        let mut params = Vec::new();
        for (i, spec) in specs.iter().enumerate() {
            if tokens.len() <= i + 1 {
                if spec.required {
                    self.usage(command, specs).await?;
                    return Ok(None);
                }
                break;
            }
            if let Ok(param) = (spec.parse)(&tokens[i + 1]) {
                params.push(param);
            } else {
                self.stream
                    .write_all(format!("Invalid {}\r\n", spec.name).as_bytes())
                    .await?;
                return Ok(None);
            }
        }
        if tokens.len() > specs.len() + 1 {
            self.usage(command, specs).await?;
            return Ok(None);
        }
        return Ok(Some(params));
    }

    async fn usage(&mut self, command: &str, specs: &Vec<Spec>) -> std::io::Result<()> {
        let mut out = String::new();
        out += format!("Usage {}", command).as_str();
        for spec in specs {
            if spec.required {
                out += format!(" <{}>", spec.name).as_str();
            } else {
                out += format!(" [{}]", spec.name).as_str();
            }
        }
        out += "\r\n";
        self.stream.write_all(out.as_bytes()).await?;
        return Ok(());
    }

    async fn write_error(&mut self, e: &AppError) -> std::io::Result<()> {
        log::warn!("Operation failed: {:?}", e);
        self.stream
            .write_all(format!("Error: {:?}: {}\r\n", e.error_type, e.message).as_bytes())
            .await?;
        return Ok(());
    }

    async fn wait_and_handle_response<T, F>(
        &mut self,
        resp_rx: oneshot::Receiver<Result<T, AppError>>,
        stringify: F,
    ) -> std::io::Result<()>
    where
        F: Fn(T) -> String,
    {
        let response = match resp_rx.await {
            Ok(response) => response,
            Err(_) => Err(AppError::runtime("no response from mixer control")),
        };
        match response {
            Ok(response) => {
                let reply = stringify(response);
                self.stream
                    .write_all(format!("{}\r\n", reply).as_bytes())
                    .await?;
            }
            Err(e) => self.write_error(&e).await?,
        }
        return Ok(());
    }
}

fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes: Option<char> = None;
    // a quoted empty string still counts as a token
    let mut quoted = false;

    for c in input.chars() {
        match c {
            '\'' | '"' => {
                if in_quotes == Some(c) {
                    in_quotes = None;
                } else if in_quotes.is_none() {
                    in_quotes = Some(c);
                    quoted = true;
                } else {
                    // different quote inside quotes
                    current.push(c);
                }
            }

            c if c.is_whitespace() && in_quotes.is_none() => {
                if !current.is_empty() || quoted {
                    tokens.push(current.clone());
                    current.clear();
                    quoted = false;
                }
            }

            _ => current.push(c),
        }
    }

    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    tokens
}
