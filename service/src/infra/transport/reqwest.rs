//! [`reqwest`]-based [`Transport`] implementation.
//!
//! [`reqwest`]: ::reqwest

use std::time::Duration;

use ::reqwest::{multipart, Client};
use smart_default::SmartDefault;
use tracerr::Traced;

#[cfg(doc)]
use super::Transport;
use super::{Body, Error, Part, PartValue, Request, Response};

/// [`Reqwest`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the catalog server.
    #[default("http://localhost:3000".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(30))]
    pub timeout: Duration,
}

/// HTTP [`Transport`] backed by a [`reqwest`] client.
///
/// [`reqwest`]: ::reqwest
#[derive(Clone, Debug)]
pub struct Reqwest {
    /// Underlying HTTP client.
    client: Client,

    /// Base URL every [`Request::path`] is resolved against.
    base_url: String,
}

impl Reqwest {
    /// Creates a new [`Reqwest`] transport with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(conf: &Config) -> Result<Self, Traced<Error>> {
        let client = Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl super::Transport<Request> for Reqwest {
    type Ok = Response;
    type Err = Traced<Error>;

    async fn execute(&self, req: Request) -> Result<Self::Ok, Self::Err> {
        let Request {
            method,
            path,
            query,
            body,
            bearer,
        } = req;

        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method, url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(token) = &bearer {
            builder = builder.bearer_auth(token.as_ref());
        }
        builder = match body {
            Body::Empty => builder,
            Body::Json(json) => builder.json(&json),
            Body::Multipart(parts) => builder.multipart(form(parts)?),
        };

        let resp = builder
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?
            .to_vec();
        tracing::debug!(status = status.as_u16(), "received response");

        Ok(Response { status, body })
    }
}

/// Builds a [`multipart::Form`] out of the provided [`Part`]s.
fn form(parts: Vec<Part>) -> Result<multipart::Form, Traced<Error>> {
    parts
        .into_iter()
        .try_fold(multipart::Form::new(), |form, Part { name, value }| {
            Ok(match value {
                PartValue::Text(text) => form.text(name, text),
                PartValue::File {
                    file_name,
                    content_type,
                    bytes,
                } => form.part(
                    name,
                    multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(content_type)
                        .map_err(tracerr::from_and_wrap!(=> Error))?,
                ),
            })
        })
}

#[cfg(test)]
mod spec {
    use std::{
        io::{Read as _, Write as _},
        net::TcpListener,
        sync::mpsc,
        thread,
    };

    use http::StatusCode;

    use crate::{
        domain::session::Token,
        infra::transport::{Part, PartValue, Request, Transport as _},
    };

    use super::{Config, Reqwest};

    /// Spawns a server answering a single request with the provided status
    /// line and JSON body, and reporting the raw request it has received.
    fn spawn_one_shot_server(
        status_line: &str,
        body: &str,
    ) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let address = listener.local_addr().expect("local address");
        let status_line = status_line.to_owned();
        let body = body.to_owned();
        let (tx, rx) = mpsc::channel();
        let _server = thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len(),
                );
                _ = stream.write_all(response.as_bytes());
                _ = stream.flush();
                _ = tx.send(request);
            }
        });
        (format!("http://{address}"), rx)
    }

    /// Reads a whole HTTP/1.1 request with a `Content-Length` body.
    fn read_request(stream: &mut impl std::io::Read) -> String {
        let mut raw = Vec::new();
        let mut buf = [0_u8; 4096];
        loop {
            let Ok(read) = stream.read(&mut buf) else { break };
            if read == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..read]);

            let text = String::from_utf8_lossy(&raw);
            let Some((head, body)) = text.split_once("\r\n\r\n") else {
                continue;
            };
            let length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if body.len() >= length {
                break;
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn transport(base_url: String) -> Reqwest {
        Reqwest::new(&Config {
            base_url,
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn sends_bearer_and_query() {
        let (url, received) =
            spawn_one_shot_server("200 OK", r#"{"products":[]}"#);

        let resp = transport(format!("{url}/"))
            .execute(
                Request::get("/products")
                    .with_query("page", 2)
                    .with_query("pageSize", 8)
                    .with_bearer(Token::new("abc")),
            )
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, br#"{"products":[]}"#);

        let request = received.recv().unwrap().to_lowercase();
        assert!(
            request.starts_with("get /products?page=2&pagesize=8 http/1.1"),
            "{request}",
        );
        assert!(request.contains("authorization: bearer abc"), "{request}");
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let (url, received) = spawn_one_shot_server("204 No Content", "");

        let resp = transport(url)
            .execute(Request::post("/products/import"))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::NO_CONTENT);
        let request = received.recv().unwrap().to_lowercase();
        assert!(request.starts_with("post /products/import "), "{request}");
        assert!(!request.contains("authorization"), "{request}");
    }

    #[tokio::test]
    async fn returns_error_statuses_as_responses() {
        let (url, _received) = spawn_one_shot_server(
            "401 Unauthorized",
            r#"{"error":"invalid credentials"}"#,
        );

        let resp = transport(url)
            .execute(Request::post("/auth/login").with_body(
                serde_json::json!({"username": "bad", "password": "bad"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.server_message().as_deref(),
            Some("invalid credentials"),
        );
    }

    #[tokio::test]
    async fn sends_multipart_form() {
        let (url, received) = spawn_one_shot_server(
            "201 Created",
            r#"{"id":1,"title":"Lamp","sku":"L-1","image_url":"u","price":5}"#,
        );

        let resp = transport(url)
            .execute(Request::post("/products").with_body(vec![
                Part::text("title", "Lamp"),
                Part::text("price", "5"),
                Part {
                    name: "image",
                    value: PartValue::File {
                        file_name: "lamp.png".to_owned(),
                        content_type: "image/png",
                        bytes: b"PNG".to_vec(),
                    },
                },
            ]))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::CREATED);
        let request = received.recv().unwrap().to_lowercase();
        assert!(request.contains("multipart/form-data"), "{request}");
        assert!(request.contains(r#"name="title""#), "{request}");
        assert!(
            request.contains(r#"name="image"; filename="lamp.png""#),
            "{request}",
        );
        assert!(request.contains("content-type: image/png"), "{request}");
    }
}
