//! # Módulo HTTP
//!
//! Este módulo implementa el núcleo del protocolo HTTP/1.1 desde cero,
//! sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line + headers, sin body)
//! - Escritura de responses sobre el stream de salida
//! - Tabla de status codes → reason phrases
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Server: RedUnix-HTTP/1.1\r\n
//! \r\n
//! <html>...</html>
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Escritura de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{ParseError, Request};
pub use response::ResponseWriter;
