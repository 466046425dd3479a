//! # HTTP/1.1 Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 minimalista implementado desde cero para demostrar
//! conceptos de sistemas operativos: concurrencia con threads, manejo
//! de recursos por conexión y parsing de protocolos de texto.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: núcleo del protocolo (parser de requests, response writer,
//!   tabla de status codes)
//! - `server`: servidor TCP y manejo de conexiones (un thread por conexión)
//! - `router`: enrutamiento de peticiones a handlers
//! - `handlers`: handlers de las rutas fijas (`/` y `/time`)
//! - `config`: configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http11_server::server::Server;
//! use http11_server::config::Config;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
