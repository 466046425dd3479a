//! # Escritura de Respuestas HTTP
//!
//! Este módulo implementa el `ResponseWriter`: el handler lo usa para
//! construir la respuesta directamente sobre el stream de salida.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Server: RedUnix-HTTP/1.1\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! ## Invariante: header-write-once
//!
//! La status line y el bloque de headers se emiten a lo sumo una vez
//! por respuesta, siempre antes del body. El flag `header_written`
//! custodia ese invariante: una segunda llamada a `write_header` es
//! un no-op (se reporta como misuse, no es error de protocolo), y
//! `write` sin header previo emite implícitamente un `200 OK`.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use std::io::Write;
//! use http11_server::http::ResponseWriter;
//!
//! let mut sink: Vec<u8> = Vec::new();
//! {
//!     let mut writer = ResponseWriter::new(&mut sink, "1.1");
//!     writer.add_header("Server", "X");
//!     writer.write_header(200);
//!     writer.write_all(b"body").unwrap();
//! }
//! assert_eq!(sink, b"HTTP/1.1 200 OK\r\nServer: X\r\n\r\nbody");
//! ```

use super::status;
use std::collections::HashMap;
use std::io::Write;

/// Construye una respuesta HTTP sobre un sink de salida
///
/// Ligado de por vida a un único sink y a una única versión HTTP.
/// Se crea uno por conexión y no se recicla: al cerrar la conexión
/// queda inutilizable.
pub struct ResponseWriter<'a> {
    /// Headers de la respuesta (el caller los pre-carga, ej: "Server")
    ///
    /// HashMap: sin orden garantizado, sin duplicados.
    headers: HashMap<String, String>,

    /// Versión HTTP con la que se emite la status line (ej: "1.1")
    version: String,

    /// Stream de salida (el socket de la conexión, o un buffer en tests)
    sink: &'a mut dyn Write,

    /// true una vez emitida la status line + headers
    header_written: bool,
}

impl<'a> ResponseWriter<'a> {
    /// Crea un writer ligado a un sink y una versión HTTP
    pub fn new(sink: &'a mut dyn Write, version: &str) -> Self {
        Self {
            headers: HashMap::new(),
            version: version.to_string(),
            sink,
            header_written: false,
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe. Solo tiene efecto antes
    /// de emitir el header: después de `write_header` los headers ya
    /// salieron por el socket.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Indica si la status line y los headers ya fueron emitidos
    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// Emite la status line y el bloque de headers
    ///
    /// Si el header ya fue escrito, la llamada es un no-op observable:
    /// se reporta por stderr como misuse del caller, no rompe ni
    /// corrompe los bytes ya enviados.
    ///
    /// Un código fuera de la tabla también se reporta como misuse,
    /// pero la emisión no se bloquea: sale con reason phrase vacía.
    ///
    /// Los errores de escritura del sink se reportan por stderr y no
    /// hacen panic: la conexión se desecha después de todas formas.
    pub fn write_header(&mut self, status_code: u16) {
        if self.header_written {
            eprintln!("   ⚠️  Header ya escrito, ignorando write_header({})", status_code);
            return;
        }
        self.header_written = true;

        let reason = match status::reason_phrase(status_code) {
            Some(phrase) => phrase,
            None => {
                eprintln!("   ⚠️  Código de estado fuera de tabla: {}", status_code);
                ""
            }
        };

        // Status line: HTTP/1.1 200 OK\r\n
        let status_line = format!("HTTP/{} {} {}\r\n", self.version, status_code, reason);
        if let Err(e) = self.sink.write_all(status_line.as_bytes()) {
            eprintln!("   ❌ Error al escribir status line: {}", e);
        }

        // Headers: Name: Value\r\n (el orden no es parte del contrato)
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            if let Err(e) = self.sink.write_all(header_line.as_bytes()) {
                eprintln!("   ❌ Error al escribir header: {}", e);
            }
        }

        // Línea vacía que separa headers del body
        if let Err(e) = self.sink.write_all(b"\r\n") {
            eprintln!("   ❌ Error al escribir fin de headers: {}", e);
        }
    }
}

impl Write for ResponseWriter<'_> {
    /// Escribe bytes del body en la conexión
    ///
    /// Si el header todavía no fue emitido, primero emite un
    /// `write_header(200)` implícito (semántica de éxito por defecto)
    /// y recién después reenvía los bytes tal cual al sink.
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if !self.header_written {
            self.write_header(200);
        }
        self.sink.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }
}
