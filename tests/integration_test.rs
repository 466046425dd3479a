//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propia instancia del servidor en un puerto
//! efímero (puerto 0), así los tests no colisionan entre sí ni
//! requieren un servidor corriendo aparte.

use http11_server::config::Config;
use http11_server::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

/// Helper: levanta un servidor en puerto efímero y retorna su dirección
///
/// El thread del accept loop queda corriendo hasta que termine el
/// proceso de tests (el loop no tiene shutdown, igual que el binario).
fn start_server() -> SocketAddr {
    let mut config = Config::default();
    config.port = 0;

    let mut server = Server::new(config);
    server.bind().expect("bind en puerto efímero");
    let addr = server.local_addr().expect("dirección tras bind");

    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");

    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).expect("write request");
    stream.flush().unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");

    response
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    // Buscar la línea vacía que separa headers del body
    if let Some(pos) = response.find("\r\n\r\n") {
        &response[pos + 4..]
    } else {
        ""
    }
}

#[test]
fn test_index_endpoint() {
    let addr = start_server();
    let response = send_raw(addr, b"GET / HTTP/1.1\r\n\r\n");

    assert!(
        response.starts_with("HTTP/1.1 200 OK\r\n"),
        "Expected 200 OK, got: {}",
        response
    );

    let body = extract_body(&response);
    assert!(body.contains("This is index"), "Body should contain index title");
    assert!(body.contains("Hello there!"), "Body should contain greeting");
}

#[test]
fn test_index_rejects_post() {
    let addr = start_server();
    let response = send_raw(addr, b"POST / HTTP/1.1\r\n\r\n");

    assert!(
        response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"),
        "Expected 405, got: {}",
        response
    );
}

#[test]
fn test_unknown_path_is_404() {
    let addr = start_server();
    let response = send_raw(addr, b"GET /nope HTTP/1.1\r\n\r\n");

    assert!(
        response.starts_with("HTTP/1.1 404 Not Found\r\n"),
        "Expected 404, got: {}",
        response
    );
}

#[test]
fn test_old_version_is_505() {
    let addr = start_server();
    let response = send_raw(addr, b"GET / HTTP/1.0\r\n\r\n");

    // La respuesta sale con la versión del servidor, no la del request
    assert!(
        response.starts_with("HTTP/1.1 505 HTTP Version Not Supported\r\n"),
        "Expected 505 with server version, got: {}",
        response
    );
}

#[test]
fn test_time_endpoint() {
    let addr = start_server();
    let response = send_raw(addr, b"GET /time HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));

    let body = extract_body(&response);
    assert!(body.contains("Server time"));

    // El timestamp debe ser un entero
    let span = body.split("<span>").nth(1).expect("span en body");
    let timestamp_str = span.split("</span>").next().unwrap();
    let _timestamp: u64 = timestamp_str.trim().parse().expect("Should be valid number");
}

#[test]
fn test_time_accepts_post() {
    let addr = start_server();
    let response = send_raw(addr, b"POST /time HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn test_server_header_present() {
    let addr = start_server();
    let response = send_raw(addr, b"GET / HTTP/1.1\r\n\r\n");

    assert!(response.contains("Server: RedUnix-HTTP/1.1\r\n"));
}

#[test]
fn test_request_with_headers() {
    let addr = start_server();
    let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\nUser-Agent: test\r\n\r\n";
    let response = send_raw(addr, raw);

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn test_malformed_request_closes_without_response() {
    let addr = start_server();
    let response = send_raw(addr, b"\x00\x01\x02\x03garbage\r\n\r\n");

    // Error de parseo: la conexión se cierra sin mandar nada al peer
    assert!(response.is_empty(), "Expected no response, got: {}", response);
}

#[test]
fn test_concurrent_connections() {
    // Varias conexiones a la vez: cada una en su propio thread del
    // servidor, todas deben responder
    let addr = start_server();

    let clients: Vec<_> = (0..8)
        .map(|_| thread::spawn(move || send_raw(addr, b"GET / HTTP/1.1\r\n\r\n")))
        .collect();

    for client in clients {
        let response = client.join().unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}
