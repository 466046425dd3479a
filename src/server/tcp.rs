//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads: un thread por conexión, fire-and-forget.
//!
//! El fan-out es no acotado (no hay pool de workers ni backpressure):
//! limitación aceptada del diseño, un peer lento solo bloquea su
//! propio thread. El accept loop es secuencial y nunca espera a que
//! una conexión termine de procesarse.
//!
//! ## Ciclo de vida de una conexión
//!
//! ```text
//! ACCEPTED → PARSING → (PARSE_FAILED | PARSED) → DISPATCHING → DONE → CLOSED
//! ```
//!
//! Una sola pasada por conexión, sin keep-alive. El `TcpStream` es
//! propiedad del thread de la conexión: se cierra por drop en todo
//! camino de salida, incluso si un handler hace panic.

use crate::config::Config;
use crate::handlers;
use crate::http::{Request, ResponseWriter};
use crate::router::Router;
use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Versión HTTP que habla este servidor
///
/// Las respuestas siempre salen con esta versión, independiente de la
/// versión que declare el request.
const SERVER_VERSION: &str = "1.1";

/// Valor del header de identificación que llevan todas las respuestas
const SERVER_HEADER: &str = "RedUnix-HTTP/1.1";

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con sus rutas registradas
    pub fn new(config: Config) -> Self {
        let mut router = Router::new();

        router.register("/", handlers::index_handler);
        router.register("/time", handlers::time_handler);

        Self {
            config,
            router: Arc::new(router),
            listener: None,
        }
    }

    /// Hace bind del listener sin empezar a aceptar conexiones
    ///
    /// Separado de `run` para poder usar puerto efímero (puerto 0) en
    /// tests y conocer la dirección real antes de arrancar el loop.
    pub fn bind(&mut self) -> std::io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Dirección real en la que escucha el listener (después de `bind`)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Arranca el accept loop (bloquea el thread actual)
    ///
    /// Hace bind si todavía no se hizo. Cada conexión aceptada se
    /// procesa en su propio thread; un error de accept se reporta y
    /// el loop sigue con la próxima conexión.
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self.listener.as_ref().expect("listener after bind");

        println!("[+] Servidor escuchando en {}", listener.local_addr()?);
        println!("[*] Modo concurrente: un thread por conexión\n");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!("   ✅ Nueva conexión desde: {} (spawning thread)", peer_addr);

                    thread::spawn(move || {
                        Self::handle_connection(stream, router);
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Procesa una conexión de principio a fin
    ///
    /// Parsea el request, construye el `ResponseWriter` pre-cargado
    /// con el header `Server`, hace el chequeo de versión (505 si no
    /// es "1.1") y despacha al router. Exactamente una pasada.
    ///
    /// Un error de parseo se reporta por stderr y la conexión se
    /// cierra sin mandarle nada al peer. El stream se cierra por drop
    /// en todo camino de salida.
    fn handle_connection(stream: TcpStream, router: Arc<Router>) {
        let mut reader = BufReader::new(&stream);

        let request = match Request::parse(&mut reader) {
            Ok(request) => request,
            Err(e) => {
                // Terminal para la conexión: no se responde nada
                eprintln!("   ❌ Error al leer request: {}", e);
                return;
            }
        };
        drop(reader);

        println!(
            "   ✅ {} {} HTTP/{}",
            request.method(),
            request.path(),
            request.version()
        );

        let mut sink = &stream;
        let mut writer = ResponseWriter::new(&mut sink, SERVER_VERSION);
        writer.add_header("Server", SERVER_HEADER);

        // Chequeo pre-dispatch: solo hablamos HTTP/1.1
        if request.version() != SERVER_VERSION {
            writer.write_header(505);
        } else {
            router.dispatch(&request, &mut writer);
        }

        if let Err(e) = (&stream).flush() {
            eprintln!("   ❌ Error al hacer flush de la conexión: {}", e);
        }
        // El stream se cierra acá por drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn test_router() -> Arc<Router> {
        let mut router = Router::new();
        router.register("/", handlers::index_handler);
        router.register("/time", handlers::time_handler);
        Arc::new(router)
    }

    /// Helper: acepta una conexión, la procesa y retorna lo que
    /// recibió el cliente tras mandarle `raw`
    fn exchange(raw: &[u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();
        let router = test_router();

        let server_thread = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            Server::handle_connection(stream, router);
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();
        client.shutdown(std::net::Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();

        server_thread.join().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_handle_connection_index() {
        let response = exchange(b"GET / HTTP/1.1\r\n\r\n");

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Server: RedUnix-HTTP/1.1\r\n"));
        assert!(response.contains("Hello there!"));
    }

    #[test]
    fn test_handle_connection_unknown_path() {
        let response = exchange(b"GET /nope HTTP/1.1\r\n\r\n");

        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_handle_connection_version_check() {
        // La versión la chequea el connection handler antes del router,
        // y la respuesta sale con la versión del servidor, no la del peer
        let response = exchange(b"GET / HTTP/1.0\r\n\r\n");

        assert!(response.starts_with("HTTP/1.1 505 HTTP Version Not Supported\r\n"));
    }

    #[test]
    fn test_handle_connection_parse_error_closes_silently() {
        // Request malformado: la conexión se cierra sin respuesta
        let response = exchange(b"garbage\r\n\r\n");

        assert!(response.is_empty());
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        // Cubre la rama de EOF inmediato: el handler debe terminar solo
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();
        let router = test_router();

        let server_thread = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            Server::handle_connection(stream, router);
        });

        // Cliente que conecta y cierra inmediatamente sin mandar datos
        drop(TcpStream::connect(addr).unwrap());

        server_thread.join().unwrap();
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let mut config = Config::default();
        config.port = 0;

        let mut server = Server::new(config);
        server.bind().unwrap();

        let addr = server.local_addr().expect("addr after bind");
        assert_ne!(addr.port(), 0);
    }
}
