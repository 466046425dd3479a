//! # Handlers de Rutas
//! src/handlers.rs
//!
//! Implementación de los handlers que registra el servidor:
//!
//! - `GET /` → página índice (405 si el método no es GET)
//! - `/time` → hora actual del servidor (cualquier método)
//!
//! Los handlers son glue: reciben el `Request` parseado y escriben
//! HTML sobre el `ResponseWriter`. El `200 OK` sale implícito en la
//! primera escritura del body.

use crate::http::{Request, ResponseWriter};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Handler para `/`
///
/// Retorna un saludo HTML. Solo acepta GET: cualquier otro método
/// recibe 405 Method Not Allowed.
pub fn index_handler(request: &Request, writer: &mut ResponseWriter<'_>) {
    if request.method() != "GET" {
        writer.write_header(405);
        return;
    }

    let body = "<html>\n\
                <title>This is index</title>\n\
                <div>Hello there!</div>\n\
                <a href='/time'>Show server time</a>\n\
                </html>";

    if let Err(e) = writer.write_all(body.as_bytes()) {
        eprintln!("   ❌ Error al escribir body de /: {}", e);
    }
}

/// Handler para `/time`
///
/// Retorna la hora actual del servidor como timestamp Unix en segundos.
/// Acepta cualquier método.
pub fn time_handler(_request: &Request, writer: &mut ResponseWriter<'_>) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    // TODO: Agregar formato ISO cuando implementemos manejo de fechas
    let body = format!(
        "<html>\n\
         <title>Server time</title>\n\
         <span>{}</span>\n\
         </html>",
        now
    );

    if let Err(e) = writer.write_all(body.as_bytes()) {
        eprintln!("   ❌ Error al escribir body de /time: {}", e);
    }
}
