//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, leyendo el
//! stream línea por línea (sin mirar más allá de la línea actual).
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /time HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/version`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: línea vacía que termina los headers
//!
//! No se lee ningún body: el servidor no interpreta `Content-Length`
//! ni transfer encodings (fuera del alcance del proyecto).
//!
//! ## Tokenización de la request line
//!
//! En vez de regex usamos un tokenizador explícito: el método es el
//! texto antes del primer espacio, el token de versión es el texto
//! después del último espacio (y debe empezar con `HTTP/`), y el path
//! es todo lo de en medio. Así evitamos backtracking patológico y el
//! comportamiento con inputs malformados es fácil de razonar.

use std::collections::HashMap;
use std::io::BufRead;

/// Representa un request HTTP parseado
///
/// Inmutable una vez creado: los campos son privados y solo se
/// exponen mediante accessors de lectura.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó (ej: "GET")
    ///
    /// Se guarda como string crudo: el parser no restringe el método,
    /// son los handlers quienes deciden si lo aceptan (ej: 405).
    method: String,

    /// Path de la petición tal como llegó (ej: "/time"), sin parsear más
    path: String,

    /// Versión HTTP declarada, sin el prefijo "HTTP/" (ej: "1.1")
    version: String,

    /// Headers HTTP (ej: {"Host": "localhost:8080"})
    ///
    /// Claves case-sensitive tal como llegaron; si un nombre se repite
    /// gana el último valor visto.
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos son terminales para la conexión: no hay reintentos.
#[derive(Debug)]
pub enum ParseError {
    /// La primera línea no tiene la forma `METHOD PATH HTTP/VERSION`
    InvalidRequestLine,

    /// Línea de header sin el separador `": "` (se incluye la línea)
    InvalidHeader(String),

    /// El stream se cerró antes de la línea vacía que termina los headers
    UnexpectedEof,

    /// Error de lectura del stream subyacente
    Io(std::io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRequestLine => write!(f, "invalid request"),
            ParseError::InvalidHeader(line) => write!(f, "invalid header: {}", line),
            ParseError::UnexpectedEof => write!(f, "stream closed before end of headers"),
            ParseError::Io(e) => write!(f, "read error: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl Request {
    /// Parsea un request HTTP desde un stream de bytes
    ///
    /// Lee línea por línea (terminadas en `\n`, con `\r` final opcional)
    /// hasta encontrar la línea vacía que cierra el bloque de headers.
    /// No consume ningún byte después de esa línea.
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error de formato, EOF prematuro o error de I/O
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use std::io::Cursor;
    /// use http11_server::http::Request;
    ///
    /// let raw = b"GET /time HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(&mut Cursor::new(&raw[..])).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/time");
    /// assert_eq!(request.version(), "1.1");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let mut headers = HashMap::new();
        let mut request_line: Option<(String, String, String)> = None;

        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line)?;
            if bytes_read == 0 {
                // EOF antes de la línea vacía: request truncado
                return Err(ParseError::UnexpectedEof);
            }

            // Quitar el terminador: `\n` con `\r` opcional
            let trimmed = line.strip_suffix('\n').unwrap_or(&line);
            let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);

            if request_line.is_none() {
                request_line = Some(Self::parse_request_line(trimmed)?);
                continue;
            }

            // La línea vacía marca el fin de los headers
            if trimmed.is_empty() {
                break;
            }

            let (name, value) = Self::parse_header(trimmed)?;
            // Nombre repetido: gana el último valor
            headers.insert(name, value);
        }

        // Acá request_line siempre es Some: la primera iteración del
        // loop la parsea o retorna error
        let (method, path, version) = request_line.ok_or(ParseError::InvalidRequestLine)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
        })
    }

    /// Tokeniza la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`
    ///
    /// Método = antes del primer espacio, versión = después del último
    /// espacio (debe empezar con `HTTP/`), path = lo de en medio.
    /// Los tres componentes deben ser no vacíos.
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let (method, rest) = line.split_once(' ').ok_or(ParseError::InvalidRequestLine)?;
        let (path, version_token) = rest.rsplit_once(' ').ok_or(ParseError::InvalidRequestLine)?;
        let version = version_token
            .strip_prefix("HTTP/")
            .ok_or(ParseError::InvalidRequestLine)?;

        if method.is_empty() || path.is_empty() || version.is_empty() {
            return Err(ParseError::InvalidRequestLine);
        }

        Ok((method.to_string(), path.to_string(), version.to_string()))
    }

    /// Parsea una línea de header
    ///
    /// Formato: `Name: Value`, separados por el literal `": "`.
    /// Se separa en el *primer* `": "`, así el valor puede contener
    /// el separador (ej: `X-Note: a: b`).
    fn parse_header(line: &str) -> Result<(String, String), ParseError> {
        let (name, value) = line
            .split_once(": ")
            .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

        if name.is_empty() || value.is_empty() {
            return Err(ParseError::InvalidHeader(line.to_string()));
        }

        Ok((name.to_string(), value.to_string()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request (string crudo, ej: "GET")
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP declarada (sin el prefijo "HTTP/")
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    ///
    /// # Ejemplo
    /// ```
    /// use std::io::Cursor;
    /// use http11_server::http::Request;
    ///
    /// let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(&mut Cursor::new(&raw[..])).unwrap();
    ///
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// assert_eq!(request.header("Missing"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }
}
