#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};
use restmodel::{
    ArrayElement, FieldInfo, FieldKind, RawResponse, Request, Resource, Result, Transport, Value,
};

/// Transport double: records every request, replays scripted responses.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(RawResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn push_ok(&self, body: &str) {
        self.push_response(200, body);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &Request) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left"))
    }
}

/// Sample resource used across the integration tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Car {
    pub id: Option<i64>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub released_at: Option<DateTime<FixedOffset>>,
    pub tags: Option<Vec<String>>,
    pub available: Option<bool>,
}

impl Resource for Car {
    const RESOURCE_PATH: &'static str = "/api/cars";

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("id", FieldKind::Int).backend_generated(true),
            FieldInfo::new("model", FieldKind::Char).max_length(100),
            FieldInfo::new("color", FieldKind::Char).rest_name("colour"),
            FieldInfo::new("released_at", FieldKind::DateTime).rest_name("released"),
            FieldInfo::new("tags", FieldKind::Array(ArrayElement::Char)),
            FieldInfo::new("available", FieldKind::Bool).default("true"),
        ];
        FIELDS
    }

    fn store(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "id" => self.id = value.try_into()?,
            "model" => self.model = value.try_into()?,
            "color" => self.color = value.try_into()?,
            "released_at" => self.released_at = value.try_into()?,
            "tags" => self.tags = value.try_into()?,
            "available" => self.available = value.try_into()?,
            other => panic!("unexpected field '{other}'"),
        }
        Ok(())
    }

    fn load(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "model" => self.model.clone().into(),
            "color" => self.color.clone().into(),
            "released_at" => self.released_at.into(),
            "tags" => self.tags.clone().into(),
            "available" => self.available.into(),
            _ => Value::Null,
        }
    }
}

/// Find a parameter by key in a recorded request.
pub fn param<'a>(request: &'a Request, key: &str) -> Option<&'a str> {
    request
        .params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
