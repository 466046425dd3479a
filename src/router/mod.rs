//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea paths HTTP a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → ResponseWriter
//! ```
//!
//! El router examina el path del request y lo dirige al handler con
//! match exacto. Si no hay handler para ese path, emite 404 Not Found.
//!
//! El contrato con el `ResponseWriter`: cada handler termina llamando
//! `write_header` (directamente o vía `write`) una sola vez en efecto;
//! el guard de write-once del writer hace inofensiva una doble llamada.
//! Un handler que no escribe nada es un bug del caller tolerado: la
//! conexión simplemente se cierra sin respuesta.

use crate::http::{Request, ResponseWriter};

/// Tipo de función handler
///
/// Un handler recibe el Request parseado y el writer de la conexión,
/// y escribe la respuesta directamente sobre él.
pub type Handler = fn(&Request, &mut ResponseWriter<'_>);

/// Router que mapea paths a handlers
pub struct Router {
    /// Mapa de path → handler
    routes: Vec<(String, Handler)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::router::Router;
    /// use http11_server::http::{Request, ResponseWriter};
    ///
    /// fn hello_handler(_req: &Request, writer: &mut ResponseWriter<'_>) {
    ///     writer.write_header(200);
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("/hello", hello_handler);
    /// ```
    pub fn register(&mut self, path: &str, handler: Handler) {
        self.routes.push((path.to_string(), handler));
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si no encuentra un handler para el path, emite 404 Not Found.
    pub fn dispatch(&self, request: &Request, writer: &mut ResponseWriter<'_>) {
        let path = request.path();

        // Buscar handler para este path
        for (route_path, handler) in &self.routes {
            if route_path == path {
                handler(request, writer);
                return;
            }
        }

        // No se encontró handler para este path
        writer.write_header(404);
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
