use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;

/// Serves exactly one canned HTTP response on an ephemeral port and hands
/// back the request line it saw.
fn serve_one(status_line: &'static str, body: &'static str) -> (SocketAddr, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("binding mock listener");
    let addr = listener.local_addr().expect("mock listener address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accepting connection");
        let mut reader = BufReader::new(stream.try_clone().expect("cloning stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        // Drain headers until the blank line
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                break;
            }
        }
        tx.send(request_line).ok();

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("writing response");
        stream.flush().ok();
        // Let the client finish reading before the socket drops
        let mut sink = Vec::new();
        let _ = reader.read_to_end(&mut sink);
    });

    (addr, rx)
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wyvern-check"))
        .args(args)
        .output()
        .expect("running wyvern-check")
}

fn chunk(id: u8) -> String {
    hex::encode({
        let mut bytes = [0u8; 32];
        bytes[31] = id;
        bytes
    })
}

const TWO_ASSETS: &str =
    r#"{"assets":[{"token_id":"1","supports_wyvern":true},{"token_id":"2","supports_wyvern":false}]}"#;

#[test]
fn prints_bitstring_for_two_tokens() {
    let (addr, _rx) = serve_one("200 OK", TWO_ASSETS);
    let blob = format!("{}{}", chunk(1), chunk(2));

    let out = run_cli(&[
        "--api-url",
        &format!("http://{addr}/assets"),
        "--no-forward-params",
        "0xABC",
        &blob,
    ]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "10");
}

#[test]
fn forwards_query_parameters_by_default() {
    let (addr, rx) = serve_one("200 OK", TWO_ASSETS);
    let blob = format!("{}{}", chunk(1), chunk(2));

    let out = run_cli(&[
        "--api-url",
        &format!("http://{addr}/assets"),
        "0xABC",
        &blob,
    ]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let request_line = rx.recv().expect("mock server saw a request");
    assert!(request_line.contains("token_ids=1"));
    assert!(request_line.contains("token_ids=2"));
    assert!(request_line.contains("asset_contract_address=0xABC"));
    assert!(request_line.contains("include_orders=false"));
    assert!(request_line.contains("format=json"));
}

#[test]
fn misaligned_blob_fails_before_any_request() {
    let blob = "0".repeat(63);

    // Unroutable URL: decoding must fail before the client is ever used
    let out = run_cli(&["--api-url", "http://127.0.0.1:1/assets", "0xABC", &blob]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("multiple of 64"), "stderr: {stderr}");
}

#[test]
fn server_error_status_exits_nonzero() {
    let (addr, _rx) = serve_one("500 Internal Server Error", "oops");

    let out = run_cli(&[
        "--api-url",
        &format!("http://{addr}/assets"),
        "--no-forward-params",
        "0xABC",
        &chunk(1),
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("500"), "stderr: {stderr}");
}

#[test]
fn non_boolean_flag_exits_nonzero() {
    let (addr, _rx) = serve_one(
        "200 OK",
        r#"{"assets":[{"token_id":"1","supports_wyvern":"true"}]}"#,
    );

    let out = run_cli(&[
        "--api-url",
        &format!("http://{addr}/assets"),
        "--no-forward-params",
        "0xABC",
        &chunk(1),
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("should be a bool"), "stderr: {stderr}");
    assert!(stderr.contains("\"true\""), "stderr: {stderr}");
}

#[test]
fn missing_token_id_exits_nonzero() {
    let (addr, _rx) = serve_one("200 OK", TWO_ASSETS);

    let out = run_cli(&[
        "--api-url",
        &format!("http://{addr}/assets"),
        "--no-forward-params",
        "0xABC",
        &chunk(3),
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("token id 3"), "stderr: {stderr}");
}
