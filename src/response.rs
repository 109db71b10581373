//! Response envelopes: `{message, <key>: record}` and `{message}`.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// `{ "message": ..., "<key>": entry }`. The key is chosen by the route family (`entry` or `crop`).
pub struct Envelope<T> {
    pub message: &'static str,
    pub key: &'static str,
    pub entry: T,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("message", self.message)?;
        map.serialize_entry(self.key, &self.entry)?;
        map.end()
    }
}

#[derive(serde::Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub fn created<T: Serialize>(message: &'static str, key: &'static str, entry: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope { message, key, entry }))
}

pub fn updated<T: Serialize>(message: &'static str, key: &'static str, entry: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope { message, key, entry }))
}

pub fn message(message: &'static str) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message }))
}
