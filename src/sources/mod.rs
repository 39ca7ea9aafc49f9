//! Bundled site adapters.

pub mod batoto;
pub mod mangalivre;
pub mod util;
pub mod weebcentral;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::request::RequestManager;
use crate::source::Source;

/// Ids of every adapter [`build`] knows about, in default registry order.
pub const BUNDLED: &[&str] = &[weebcentral::ID, mangalivre::ID, batoto::ID];

pub fn build(id: &str, manager: Arc<dyn RequestManager>) -> Result<Arc<dyn Source>> {
    let source: Arc<dyn Source> = match id {
        weebcentral::ID => Arc::new(weebcentral::WeebCentral::new(manager)?),
        mangalivre::ID => Arc::new(mangalivre::MangaLivre::new(manager)?),
        batoto::ID => Arc::new(batoto::Batoto::new(manager)?),
        _ => {
            return Err(Error::UnknownIdentifier {
                kind: "source",
                id: id.to_string(),
            });
        }
    };
    Ok(source)
}
