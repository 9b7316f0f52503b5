//! Read operations over the asset collection.
//!
//! The service keeps the last fetched listing in memory so the free-text
//! search runs locally - the API has no search endpoint; filtering is a
//! read-side convenience of this client.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::debug;

use crate::models::{Asset, OccupancySummary};

use super::{ApiError, AuthorizedFetcher};

/// Characters that may not appear raw inside a single path segment.
/// Scanned QR payloads are arbitrary text; anything that could terminate
/// the segment or start a query/fragment gets percent-encoded.
const CODE_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Asset lookup built on the authorized fetcher.
pub struct AssetService {
    fetcher: AuthorizedFetcher,
    cached: Option<Vec<Asset>>,
}

impl AssetService {
    pub fn new(fetcher: AuthorizedFetcher) -> Self {
        Self {
            fetcher,
            cached: None,
        }
    }

    /// Fetch the complete asset collection. No pagination; ordering is
    /// server-determined. The result is cached for [`AssetService::search`].
    pub async fn list_all(&mut self) -> Result<Vec<Asset>, ApiError> {
        let assets: Vec<Asset> = self.fetcher.get("/bienes").await?;
        debug!(count = assets.len(), "Fetched asset listing");
        self.cached = Some(assets.clone());
        Ok(assets)
    }

    /// Explicitly re-fetch the listing. This is the manual retry operation:
    /// it always goes to the network, never serves the cache.
    pub async fn refresh(&mut self) -> Result<Vec<Asset>, ApiError> {
        self.list_all().await
    }

    /// The last successfully fetched listing, if any.
    pub fn cached(&self) -> Option<&[Asset]> {
        self.cached.as_deref()
    }

    /// Case-insensitive substring search over the cached listing, matching
    /// asset-type name, place, responsible-user name, model name, and
    /// barcode. A blank query returns the whole cached list; an empty cache
    /// yields nothing.
    pub fn search(&self, query: &str) -> Vec<Asset> {
        let Some(assets) = self.cached.as_deref() else {
            return Vec::new();
        };
        let query = query.trim();
        if query.is_empty() {
            return assets.to_vec();
        }
        assets
            .iter()
            .filter(|asset| asset.matches_query(query))
            .cloned()
            .collect()
    }

    /// Look up a single asset by its scanned barcode/QR payload.
    ///
    /// An unknown code surfaces as `Http { status: 404, .. }` with the
    /// server's message; the caller presents it and allows re-scanning.
    pub async fn find_by_code(&self, code: &str) -> Result<Asset, ApiError> {
        let code = utf8_percent_encode(code, CODE_SEGMENT);
        self.fetcher.get(&format!("/bienes/buscar/{code}")).await
    }

    /// Aggregate occupied/free figures for the summary screen.
    pub async fn occupancy_summary(&self) -> Result<OccupancySummary, ApiError> {
        self.fetcher
            .get_unenveloped("/bienes/porcentaje-ocupacion")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryStore, TokenStore};
    use crate::config::Config;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::sync::Arc;
    use std::thread::JoinHandle;

    /// Serve one canned 200 response on an ephemeral port, returning the raw
    /// request the client sent so tests can assert on the wire.
    fn serve_once(body: &'static str) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let addr = listener.local_addr().expect("listener addr");
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                match stream.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        request.extend_from_slice(&chunk[..n]);
                        if request.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
            String::from_utf8_lossy(&request).into_owned()
        });
        (addr, handle)
    }

    fn service_against(addr: SocketAddr) -> AssetService {
        let store = Arc::new(MemoryStore::new());
        store.save("session-token");
        let config = Config::new(format!("http://{addr}"));
        let fetcher = AuthorizedFetcher::new(&config, store).expect("fetcher");
        AssetService::new(fetcher)
    }

    fn service_with_cache(json: &str) -> AssetService {
        // Unroutable address: search tests never touch the network.
        let config = Config::new("http://127.0.0.1:9");
        let fetcher =
            AuthorizedFetcher::new(&config, Arc::new(MemoryStore::new())).expect("fetcher");
        let mut service = AssetService::new(fetcher);
        service.cached = Some(serde_json::from_str(json).expect("fixture assets"));
        service
    }

    fn three_assets() -> AssetService {
        service_with_cache(
            r#"[
                {
                    "idBien": 1,
                    "codigoBarras": "BIEN-0001",
                    "tipoBien": { "nombre": "Laptop" },
                    "lugar": { "lugar": "M1" },
                    "usuario": { "nombre": "Uxue" },
                    "modelo": { "nombreModelo": "23fr5t6" }
                },
                {
                    "idBien": 2,
                    "codigoBarras": "BIEN-0002",
                    "tipoBien": { "nombre": "Proyector" },
                    "lugar": { "lugar": "Aula 3" },
                    "usuario": { "nombre": "Emy" },
                    "modelo": { "nombreModelo": "PX-200" }
                },
                {
                    "idBien": 3,
                    "codigoBarras": "BIEN-0003",
                    "tipoBien": { "nombre": "Laptop" },
                    "usuario": { "nombre": "Elias" },
                    "modelo": { "nombreModelo": "A1466" }
                }
            ]"#,
        )
    }

    #[test]
    fn search_matches_place_case_insensitively() {
        let service = three_assets();
        let hits = service.search("m1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn search_spans_the_documented_fields() {
        let service = three_assets();
        assert_eq!(service.search("laptop").len(), 2); // type
        assert_eq!(service.search("emy").len(), 1); // responsible
        assert_eq!(service.search("px-200").len(), 1); // model
        assert_eq!(service.search("BIEN-0003").len(), 1); // barcode
        assert!(service.search("impresora").is_empty());
    }

    #[test]
    fn blank_query_returns_entire_cached_list() {
        let service = three_assets();
        assert_eq!(service.search("").len(), 3);
        assert_eq!(service.search("   ").len(), 3);
    }

    #[test]
    fn search_without_a_cached_listing_yields_nothing() {
        let config = Config::new("http://127.0.0.1:9");
        let fetcher =
            AuthorizedFetcher::new(&config, Arc::new(MemoryStore::new())).expect("fetcher");
        let service = AssetService::new(fetcher);
        assert!(service.cached().is_none());
        assert!(service.search("laptop").is_empty());
    }

    #[tokio::test]
    async fn find_by_code_round_trips_the_scanned_barcode() {
        let (addr, server) = serve_once(
            r#"{"result": {"idBien": 7, "codigoBarras": "BIEN-0007", "lugar": {"lugar": "M1"}}}"#,
        );
        let service = service_against(addr);

        let asset = service.find_by_code("BIEN-0007").await.expect("lookup");

        assert_eq!(asset.barcode.as_deref(), Some("BIEN-0007"));
        assert!(asset.is_occupied());
        let request = server.join().expect("server thread");
        assert!(request.starts_with("GET /bienes/buscar/BIEN-0007 HTTP/1.1"));
        assert!(request
            .to_lowercase()
            .contains("authorization: bearer session-token"));
    }

    #[tokio::test]
    async fn scanned_code_stays_a_single_path_segment() {
        let (addr, server) = serve_once(r#"{"result": {"idBien": 9}}"#);
        let service = service_against(addr);

        service.find_by_code("AB/1 2?").await.expect("lookup");

        let request = server.join().expect("server thread");
        assert!(request.starts_with("GET /bienes/buscar/AB%2F1%202%3F HTTP/1.1"));
    }

    #[test]
    fn normal_barcodes_pass_through_unencoded() {
        assert_eq!(
            utf8_percent_encode("BIEN-0007", CODE_SEGMENT).to_string(),
            "BIEN-0007"
        );
    }

    #[tokio::test]
    async fn list_all_without_token_fails_before_the_network() {
        let config = Config::new("http://127.0.0.1:9");
        let fetcher =
            AuthorizedFetcher::new(&config, Arc::new(MemoryStore::new())).expect("fetcher");
        let mut service = AssetService::new(fetcher);

        let err = service.list_all().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        assert!(service.cached().is_none());
    }

    #[tokio::test]
    async fn find_by_code_without_token_fails_before_the_network() {
        let config = Config::new("http://127.0.0.1:9");
        let fetcher =
            AuthorizedFetcher::new(&config, Arc::new(MemoryStore::new())).expect("fetcher");
        let service = AssetService::new(fetcher);

        let err = service.find_by_code("UNKNOWN123").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }
}
