//! Share links: a tree travels as base64-encoded JSON in the `data` query parameter.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use url::Url;

use crate::error::{MindMapError, Result};
use crate::mindmap::MindNode;

pub const SHARE_PARAM: &str = "data";

/// Encode a tree as URL-safe base64 JSON, without padding.
pub fn encode(tree: &MindNode) -> Result<String> {
    let json = serde_json::to_vec(tree)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a shared tree. Accepts the URL-safe and the standard alphabet, padded or not.
pub fn decode(data: &str) -> Result<MindNode> {
    let data = data.trim();
    if data.is_empty() {
        return Err(MindMapError::Share("empty share data".to_string()));
    }

    let bytes = if data.contains(['+', '/']) {
        STANDARD.decode(pad(data))?
    } else {
        URL_SAFE_NO_PAD.decode(data.trim_end_matches('='))?
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Build `base?data=<encoded tree>`, keeping any query pairs already on `base`.
pub fn share_url(base: &str, tree: &MindNode) -> Result<Url> {
    let mut url = Url::parse(base)?;
    let encoded = encode(tree)?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != SHARE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(SHARE_PARAM, &encoded);
    Ok(url)
}

/// Pull the tree back out of a share link.
pub fn from_url(link: &str) -> Result<MindNode> {
    let url = Url::parse(link)?;
    let data = url
        .query_pairs()
        .find(|(k, _)| k == SHARE_PARAM)
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| MindMapError::Share(format!("no '{}' parameter in link", SHARE_PARAM)))?;
    decode(&data)
}

fn pad(data: &str) -> String {
    let mut padded = data.trim_end_matches('=').to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}
