mod compat;
mod fallback;

pub(crate) use compat::{BookingContract, CreateBookingRequest};
pub(crate) use fallback::{RouteFamily, RouteTable};

use crate::config::EnvConfig;
use crate::models::de::{value_as_f64, value_as_i64, value_as_text};
use crate::models::{Booking, Customer, Gender, Listing, ListingDetail, Room};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// The request never got an HTTP answer.
    Network,
    /// Non-2xx answer.
    Http,
    /// Body could not be decoded.
    Parse,
    /// 2xx answer missing something we need (e.g. a user id).
    Contract,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
        }
    }

    pub(crate) fn http(status: u16, message: String) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            status: Some(status),
            message,
        }
    }

    pub(crate) fn contract(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Contract,
            status: None,
            message: message.into(),
        }
    }

    pub(crate) fn no_candidates() -> Self {
        Self::contract("Request failed")
    }

    /// The route itself does not exist on this backend.
    pub(crate) fn is_route_missing(&self) -> bool {
        self.kind == ApiErrorKind::Http && matches!(self.status, Some(404 | 405))
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub name: String,
    pub phone: String,
    pub gender: Gender,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct CancelBookingRequest {
    pub user_id: i64,
}

/// Screenshot picked by the customer, read fully into memory.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn to_form(&self) -> ApiResult<reqwest::multipart::Form> {
        let mut part =
            reqwest::multipart::Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        if !self.mime.trim().is_empty() {
            part = part.mime_str(&self.mime).map_err(ApiError::parse)?;
        }
        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

#[derive(Clone, Debug)]
enum Body {
    Empty,
    Json(Value),
    File(UploadFile),
}

/// Payment details returned alongside a freshly created booking.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct BookingReceipt {
    pub booking_id: Option<i64>,
    pub owner_upi: Option<String>,
    pub note: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) contract: BookingContract,
    pub(crate) routes: RouteTable,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            contract: BookingContract::default(),
            routes: RouteTable::default(),
        }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            contract: config.booking_contract,
            ..Self::new(config.api_url.clone())
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str, body: Body) -> ApiResult<Value> {
        let client = reqwest::Client::new();
        let mut req = client.request(method.clone(), self.url(path));
        req = match body {
            Body::Empty => req,
            Body::Json(v) => req.json(&v),
            Body::File(f) => req.multipart(f.to_form()?),
        };

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        let is_json = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = res.text().await.map_err(ApiError::network)?;

        let out = read_body(status, is_json, &text);
        if let Err(e) = &out {
            tracing::warn!("{method} {path} failed: {e}");
        }
        out
    }

    async fn get(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::GET, path, Body::Empty).await
    }

    async fn post_json(&self, path: &str, body: &impl Serialize) -> ApiResult<Value> {
        let body = serde_json::to_value(body).map_err(ApiError::parse)?;
        self.send(Method::POST, path, Body::Json(body)).await
    }

    pub async fn login(&self, name: &str, phone: &str, gender: Gender) -> ApiResult<Customer> {
        let out = self
            .post_json(
                "/auth/customer",
                &LoginRequest {
                    name: name.to_string(),
                    phone: phone.to_string(),
                    gender,
                },
            )
            .await?;
        parse_login_response(&out)
    }

    pub async fn list_listings(&self, area: &str) -> ApiResult<Vec<Listing>> {
        let out = self.get(&listings_path(area)).await?;
        parse_list(&out, "listings")
    }

    pub async fn listing_detail(&self, pg_id: i64) -> ApiResult<ListingDetail> {
        let out = self.get(&format!("/pgs/{pg_id}")).await?;
        Ok(parse_listing_detail(&out))
    }

    pub async fn create_booking(&self, req: &CreateBookingRequest) -> ApiResult<BookingReceipt> {
        let body = self.contract.encode(req)?;
        let out = self.send(Method::POST, "/bookings", Body::Json(body)).await?;
        Ok(parse_booking_receipt(&out))
    }

    pub async fn upload_payment_screenshot(
        &mut self,
        booking_id: i64,
        file: &UploadFile,
    ) -> ApiResult<Value> {
        let mut routes = std::mem::take(&mut self.routes);
        let this = &*self;
        let out = routes
            .resolve(
                RouteFamily::PaymentScreenshot,
                payment_screenshot_paths(booking_id),
                |path: String| async move {
                    this.send(Method::POST, &path, Body::File(file.clone())).await
                },
            )
            .await;
        self.routes = routes;
        out
    }

    pub async fn my_bookings(&mut self, user_id: i64) -> ApiResult<Vec<Booking>> {
        let mut routes = std::mem::take(&mut self.routes);
        let this = &*self;
        let out = routes
            .resolve(
                RouteFamily::CustomerBookings,
                customer_booking_paths(user_id),
                |path: String| async move { this.get(&path).await },
            )
            .await;
        self.routes = routes;
        parse_list(&out?, "bookings")
    }

    /// Returns the id the backend reports as cancelled, when it reports one.
    pub async fn cancel_booking(&self, booking_id: i64, user_id: i64) -> ApiResult<Option<i64>> {
        let out = self
            .post_json(
                &format!("/customer/bookings/{booking_id}/cancel"),
                &CancelBookingRequest { user_id },
            )
            .await?;
        Ok(data_of(&out).get("id").and_then(value_as_i64))
    }
}

/// Decode a response body and turn non-2xx answers into errors.
pub(crate) fn read_body(status: u16, is_json: bool, text: &str) -> ApiResult<Value> {
    let ok = (200..300).contains(&status);
    let body = if is_json && !text.trim().is_empty() {
        match serde_json::from_str::<Value>(text) {
            Ok(v) => v,
            Err(e) if ok => return Err(ApiError::parse(e)),
            Err(_) => Value::String(text.to_string()),
        }
    } else if is_json {
        Value::Null
    } else {
        Value::String(text.to_string())
    };

    if ok {
        Ok(body)
    } else {
        Err(ApiError::http(status, failure_message(status, &body)))
    }
}

/// `error` field of a JSON failure, else the whole body, else `HTTP <status>`.
pub(crate) fn failure_message(status: u16, body: &Value) -> String {
    let msg = match body {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => match other.get("error") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(e) if is_truthy(e) => e.to_string(),
            _ => other.to_string(),
        },
    };

    if msg.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        msg
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Responses wrap their payload in `data`; some older routes return it bare.
pub(crate) fn data_of(out: &Value) -> &Value {
    match out.get("data") {
        Some(d) if is_truthy(d) => d,
        _ => out,
    }
}

pub(crate) fn parse_list<T: DeserializeOwned>(out: &Value, what: &str) -> ApiResult<Vec<T>> {
    let Some(items) = data_of(out).as_array() else {
        return Err(ApiError::contract(format!("Unexpected {what} response")));
    };

    let mut parsed = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(v) => parsed.push(v),
            Err(e) => tracing::warn!("skipping malformed {what} entry: {e}"),
        }
    }
    Ok(parsed)
}

pub(crate) fn parse_login_response(out: &Value) -> ApiResult<Customer> {
    out.pointer("/data/user")
        .and_then(|u| serde_json::from_value::<Customer>(u.clone()).ok())
        .filter(|c| c.id != 0)
        .ok_or_else(|| ApiError::contract("Login failed"))
}

/// Accepts `{data: {pg, rooms}}` and the flat `{data: {...pg}, rooms}` shape.
pub(crate) fn parse_listing_detail(out: &Value) -> ListingDetail {
    let data = out.get("data").filter(|d| is_truthy(d));
    let nested_pg = data.and_then(|d| d.get("pg")).filter(|p| is_truthy(p));

    let (pg, rooms) = match (nested_pg, data) {
        (Some(pg), Some(d)) => (Some(pg), d.get("rooms")),
        (None, Some(d)) => (
            Some(d),
            out.get("rooms")
                .filter(|r| is_truthy(r))
                .or_else(|| d.get("rooms")),
        ),
        _ => (None, out.get("rooms")),
    };

    let listing = pg.and_then(|p| serde_json::from_value::<Listing>(p.clone()).ok());
    let rooms = rooms
        .and_then(|r| r.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|r| serde_json::from_value::<Room>(r.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    ListingDetail { listing, rooms }
}

pub(crate) fn parse_booking_receipt(out: &Value) -> BookingReceipt {
    let data = out.get("data").cloned().unwrap_or(Value::Null);
    let text_at = |ptr: &str| {
        data.pointer(ptr)
            .and_then(value_as_text)
            .filter(|s| !s.trim().is_empty())
    };

    BookingReceipt {
        booking_id: data
            .get("id")
            .and_then(value_as_i64)
            .filter(|id| *id != 0)
            .or_else(|| data.pointer("/booking/id").and_then(value_as_i64))
            .filter(|id| *id != 0),
        owner_upi: text_at("/payment/ownerUpi").or_else(|| text_at("/booking/owner_upi")),
        note: text_at("/payment/note"),
        amount: data
            .pointer("/booking/total_amount")
            .and_then(value_as_f64)
            .or_else(|| data.get("total_amount").and_then(value_as_f64)),
    }
}

pub(crate) fn listings_path(area: &str) -> String {
    let area = area.trim();
    if area.is_empty() {
        "/pgs".to_string()
    } else {
        format!("/pgs?area={}", urlencoding::encode(area))
    }
}

pub(crate) fn payment_screenshot_paths(booking_id: i64) -> Vec<String> {
    vec![
        format!("/bookings/{booking_id}/payment-screenshot"),
        format!("/customer/bookings/{booking_id}/payment-screenshot"),
    ]
}

pub(crate) fn customer_booking_paths(user_id: i64) -> Vec<String> {
    vec![
        format!("/customer/bookings/{user_id}"),
        format!("/customer/bookings?user_id={user_id}"),
        format!("/bookings/customer/{user_id}"),
        format!("/bookings?user_id={user_id}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://localhost:8080/api".to_string());
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert_eq!(client.url("/pgs"), "http://localhost:8080/api/pgs");
        assert_eq!(client.contract, BookingContract::DualCase);
        assert_eq!(client.routes, RouteTable::default());
    }

    #[test]
    fn test_api_client_from_config() {
        let cfg = EnvConfig::from_values(None, None, Some("canonical".to_string()));
        let client = ApiClient::from_config(&cfg);
        assert_eq!(client.base_url, crate::config::DEFAULT_API_URL);
        assert_eq!(client.contract, BookingContract::Canonical);
    }

    #[test]
    fn test_login_request_serialization() {
        let v = serde_json::to_value(LoginRequest {
            name: "Ram".to_string(),
            phone: "9999999999".to_string(),
            gender: Gender::Girl,
        })
        .expect("should serialize");
        assert_eq!(v, json!({"name": "Ram", "phone": "9999999999", "gender": "girl"}));
    }

    #[test]
    fn test_read_body_json_success() {
        let v = read_body(200, true, r#"{"data":[1,2]}"#).expect("2xx json");
        assert_eq!(v["data"][1], 2);
    }

    #[test]
    fn test_read_body_text_success_is_opaque() {
        let v = read_body(201, false, "created").expect("2xx text");
        assert_eq!(v, Value::String("created".to_string()));
    }

    #[test]
    fn test_read_body_bad_json_on_success_is_parse_error() {
        let err = read_body(200, true, "{oops").expect_err("broken json");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_failure_uses_error_field() {
        let err = read_body(400, true, r#"{"error":"customerUpi required"}"#).expect_err("4xx");
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "customerUpi required");
    }

    #[test]
    fn test_failure_serializes_structured_error() {
        let err = read_body(422, true, r#"{"error":{"field":"phone"}}"#).expect_err("4xx");
        assert_eq!(err.message, r#"{"field":"phone"}"#);
    }

    #[test]
    fn test_failure_without_error_field_uses_body() {
        let err = read_body(500, true, r#"{"ok":false}"#).expect_err("5xx");
        assert_eq!(err.message, r#"{"ok":false}"#);
    }

    #[test]
    fn test_failure_text_and_empty_bodies() {
        let err = read_body(502, false, "Bad Gateway").expect_err("5xx");
        assert_eq!(err.message, "Bad Gateway");
        let err = read_body(404, false, "").expect_err("4xx");
        assert_eq!(err.message, "HTTP 404");
        assert!(err.is_route_missing());
        let err = read_body(503, true, "").expect_err("5xx");
        assert_eq!(err.message, "HTTP 503");
        assert!(!err.is_route_missing());
    }

    #[test]
    fn test_login_response_contract() {
        let out = json!({"data": {"user": {"id": 5, "name": "Ram", "phone": "1", "gender": "boy"}}});
        let c = parse_login_response(&out).expect("login should parse");
        assert_eq!(c.id, 5);
        assert_eq!(c.name, "Ram");

        let err = parse_login_response(&json!({"data": {}})).expect_err("no user");
        assert_eq!(err.message, "Login failed");
        assert_eq!(err.kind, ApiErrorKind::Contract);
    }

    #[test]
    fn test_parse_list_wrapped_and_bare() {
        let wrapped = json!({"data": [{"id": 1, "name": "A"}, {"name": "no id"}]});
        let pgs: Vec<Listing> = parse_list(&wrapped, "listings").expect("array");
        assert_eq!(pgs.len(), 1);
        assert_eq!(pgs[0].name, "A");

        let bare = json!([{"id": 2, "status": "pending"}]);
        let bookings: Vec<Booking> = parse_list(&bare, "bookings").expect("array");
        assert_eq!(bookings[0].id, 2);

        let empty: Vec<Listing> = parse_list(&json!({"data": []}), "listings").expect("array");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_list_rejects_non_array() {
        let err = parse_list::<Listing>(&json!({"data": {"id": 1}}), "listings")
            .expect_err("object is not a list");
        assert_eq!(err.message, "Unexpected listings response");
    }

    #[test]
    fn test_listing_detail_nested_shape() {
        let out = json!({"data": {
            "pg": {"id": 11, "name": "Sunrise", "pg_type": "boys"},
            "rooms": [{"id": 1, "room_type": "double", "rent_monthly": 5000}]
        }});
        let d = parse_listing_detail(&out);
        assert_eq!(d.listing.as_ref().map(|l| l.id), Some(11));
        assert_eq!(d.rooms.len(), 1);
    }

    #[test]
    fn test_listing_detail_flat_shapes() {
        let side_channel = json!({
            "data": {"id": 11, "name": "Sunrise"},
            "rooms": [{"id": 1}, {"id": 2}]
        });
        let d = parse_listing_detail(&side_channel);
        assert_eq!(d.listing.as_ref().map(|l| l.name.as_str()), Some("Sunrise"));
        assert_eq!(d.rooms.len(), 2);

        let inline = json!({"data": {"id": 11, "name": "Sunrise", "rooms": [{"id": 3}]}});
        let d = parse_listing_detail(&inline);
        assert_eq!(d.rooms.first().map(|r| r.id), Some(3));
    }

    #[test]
    fn test_listing_detail_empty() {
        let d = parse_listing_detail(&json!({"data": null}));
        assert!(d.listing.is_none());
        assert!(d.rooms.is_empty());
    }

    #[test]
    fn test_booking_receipt_from_payment_block() {
        let out = json!({"data": {
            "booking": {"id": 77, "total_amount": "6299", "owner_upi": "owner@old"},
            "payment": {"ownerUpi": "owner@upi", "note": "Pay within 24h"}
        }});
        let r = parse_booking_receipt(&out);
        assert_eq!(r.booking_id, Some(77));
        assert_eq!(r.owner_upi.as_deref(), Some("owner@upi"));
        assert_eq!(r.note.as_deref(), Some("Pay within 24h"));
        assert_eq!(r.amount, Some(6299.0));
    }

    #[test]
    fn test_booking_receipt_flat() {
        let out = json!({"data": {"id": 8, "total_amount": 6299, "booking": {"owner_upi": "o@upi"}}});
        let r = parse_booking_receipt(&out);
        assert_eq!(r.booking_id, Some(8));
        assert_eq!(r.owner_upi.as_deref(), Some("o@upi"));
        assert!(r.note.is_none());
        assert_eq!(r.amount, Some(6299.0));

        assert_eq!(parse_booking_receipt(&json!({"ok": true})), BookingReceipt::default());
    }

    #[test]
    fn test_listings_path_encodes_area() {
        assert_eq!(listings_path("  "), "/pgs");
        assert_eq!(listings_path("Malviya Nagar"), "/pgs?area=Malviya%20Nagar");
    }

    #[test]
    fn test_candidate_paths_order() {
        assert_eq!(
            payment_screenshot_paths(9),
            vec![
                "/bookings/9/payment-screenshot".to_string(),
                "/customer/bookings/9/payment-screenshot".to_string(),
            ]
        );
        let paths = customer_booking_paths(3);
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0], "/customer/bookings/3");
        assert_eq!(paths[1], "/customer/bookings?user_id=3");
        assert_eq!(paths[2], "/bookings/customer/3");
        assert_eq!(paths[3], "/bookings?user_id=3");
    }
}
