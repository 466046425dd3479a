//! # Códigos de Estado HTTP
//!
//! Este módulo define la tabla de reason phrases que usa el servidor.
//! Según el RFC 9112, la status line tiene la forma:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! ```
//!
//! La tabla es cerrada: solo contiene los códigos que el servidor
//! emite. Un código fuera de la tabla no bloquea la emisión, el
//! `ResponseWriter` lo manda igual con reason phrase vacía (y lo
//! reporta como misuse del caller).

/// Tabla código → reason phrase
///
/// Textos estándar del RFC 9110.
const REASON_PHRASES: &[(u16, &str)] = &[
    (200, "OK"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (505, "HTTP Version Not Supported"),
];

/// Busca la reason phrase de un código de estado
///
/// Retorna `None` si el código no está en la tabla del servidor.
///
/// # Ejemplo
/// ```
/// use http11_server::http::status::reason_phrase;
///
/// assert_eq!(reason_phrase(200), Some("OK"));
/// assert_eq!(reason_phrase(404), Some("Not Found"));
/// assert_eq!(reason_phrase(999), None);
/// ```
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    REASON_PHRASES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, phrase)| *phrase)
}
