use std::collections::HashMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(content_type: Option<&'static str>, body: &str) -> CannedResponse {
        CannedResponse {
            status: "200 OK",
            content_type,
            body: body.to_string(),
        }
    }

    pub fn status(status: &'static str) -> CannedResponse {
        CannedResponse {
            status,
            content_type: Some("text/plain"),
            body: status.to_string(),
        }
    }
}

/// Answers every request for a path with its canned response (404 for unknown paths) and
/// returns the base URL of the server.
pub async fn serve(routes: HashMap<&'static str, CannedResponse>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buffer).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buffer[..n]),
                }
            }
            let request = String::from_utf8_lossy(&request);
            let path = request
                .split_whitespace()
                .nth(1)
                .and_then(|target| target.split('?').next())
                .unwrap_or("/");
            let response = routes
                .get(path)
                .cloned()
                .unwrap_or_else(|| CannedResponse::status("404 Not Found"));
            let mut head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                response.status,
                response.body.len()
            );
            if let Some(content_type) = response.content_type {
                head.push_str(&format!("Content-Type: {content_type}\r\n"));
            }
            head.push_str("\r\n");
            let _ = stream.write_all(head.as_bytes()).await;
            let _ = stream.write_all(response.body.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{address}")
}
