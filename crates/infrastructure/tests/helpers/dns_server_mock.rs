use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Any query type; used for per-host behaviors.
const ANY_TYPE: u16 = 0;

#[derive(Clone, Debug)]
pub enum MockAnswer {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Raw { rtype: u16, rdata: Vec<u8> },
}

#[derive(Clone, Debug)]
pub enum MockBehavior {
    Answer(Vec<MockAnswer>),
    NxDomain,
    /// Reads the query and never replies.
    Silent,
    /// Replies with a transaction ID that does not match the query.
    WrongId,
}

#[derive(Clone, Debug, Default)]
pub struct MockZone {
    entries: HashMap<(String, u16), MockBehavior>,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, qtype: u16, behavior: MockBehavior) -> Self {
        self.entries
            .insert((name.to_ascii_lowercase(), qtype), behavior);
        self
    }

    /// Same behavior for every query type of `name`.
    pub fn with_host(self, name: &str, behavior: MockBehavior) -> Self {
        self.with(name, ANY_TYPE, behavior)
    }

    fn lookup(&self, name: &str, qtype: u16) -> MockBehavior {
        self.entries
            .get(&(name.to_string(), qtype))
            .or_else(|| self.entries.get(&(name.to_string(), ANY_TYPE)))
            .cloned()
            .unwrap_or(MockBehavior::Answer(Vec::new()))
    }
}

/// DNS-over-TCP server on 127.0.0.1 answering from a [`MockZone`].
pub struct MockTcpDnsServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<(String, u16)>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTcpDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let zone = Arc::new(zone);
        let connections = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let accept_connections = Arc::clone(&connections);
        let accept_queries = Arc::clone(&queries);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            accept_connections.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(handle_connection(
                                stream,
                                Arc::clone(&zone),
                                Arc::clone(&accept_queries),
                            ));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            connections,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<(String, u16)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockTcpDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    zone: Arc<MockZone>,
    queries: Arc<Mutex<Vec<(String, u16)>>>,
) {
    loop {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }

        let Some((name, qtype, question_end)) = parse_question(&query) else {
            return;
        };
        queries.lock().unwrap().push((name.clone(), qtype));

        let response = match zone.lookup(&name, qtype) {
            MockBehavior::Silent => continue,
            MockBehavior::Answer(answers) => {
                let matching: Vec<MockAnswer> = answers
                    .into_iter()
                    .filter(|answer| {
                        matches!(answer, MockAnswer::Raw { .. }) || answer_type(answer) == qtype
                    })
                    .collect();
                build_response(&query, question_end, 0, &matching)
            }
            MockBehavior::NxDomain => build_response(&query, question_end, 3, &[]),
            MockBehavior::WrongId => {
                let mut response = build_response(&query, question_end, 0, &[]);
                response[0] ^= 0xff;
                response[1] ^= 0xff;
                response
            }
        };

        let len = (response.len() as u16).to_be_bytes();
        if stream.write_all(&len).await.is_err() || stream.write_all(&response).await.is_err() {
            return;
        }
        let _ = stream.flush().await;
    }
}

fn answer_type(answer: &MockAnswer) -> u16 {
    match answer {
        MockAnswer::A(_) => 1,
        MockAnswer::Aaaa(_) => 28,
        MockAnswer::Cname(_) => 5,
        MockAnswer::Raw { rtype, .. } => *rtype,
    }
}

fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    Some((labels.join("."), qtype, pos + 4))
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Hand-assembled response: header, echoed question, then answers owned by
/// the question name (compression pointer to offset 12).
pub fn build_response(
    query: &[u8],
    question_end: usize,
    rcode: u8,
    answers: &[MockAnswer],
) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80 | rcode);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&query[12..question_end]);

    for answer in answers {
        let rdata = match answer {
            MockAnswer::A(ip) => ip.octets().to_vec(),
            MockAnswer::Aaaa(ip) => ip.octets().to_vec(),
            MockAnswer::Cname(target) => encode_name(target),
            MockAnswer::Raw { rdata, .. } => rdata.clone(),
        };
        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&answer_type(answer).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    response
}

