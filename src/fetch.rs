//! Downloading CSV exports.

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use tracing::debug;

use crate::{error::Error, types::Source};

/// Retrieves the CSV text of a source.
pub trait Fetcher {
    fn fetch(&self, source: &Source) -> Result<String, Error>;
}

/// Fetches sources with a single blocking HTTP GET each. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("strandgen/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, source: &Source) -> Result<String, Error> {
        debug!("GET {} ({})", source.url, source.title);
        let response = self.client.get(&source.url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                source_name: source.title.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;
        Ok(decode_body(&bytes))
    }
}

/// Decodes a response body as UTF-8, dropping a leading byte order mark.
///
/// Spreadsheet exports often start with a BOM, which would otherwise end up
/// in the first header cell and hide the key column.
pub fn decode_body(bytes: &[u8]) -> String {
    let (text, _) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    text.into_owned()
}
