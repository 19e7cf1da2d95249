//! Same-origin fetch helpers
//!
//! Every mutating call posts `FormData` with the CSRF header and answers with
//! the `{success, message|error}` envelope.

use axe_catalog_common::{Error, Result, ServerReply};
use gloo::console;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

pub const CSRF_HEADER: &str = "X-CSRFToken";

pub(crate) fn js_error(e: JsValue) -> Error {
    Error::Transport(format!("{:?}", e))
}

async fn send(request: &Request) -> Result<Response> {
    let window = gloo::utils::window();
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    resp_value.dyn_into::<Response>().map_err(js_error)
}

async fn response_text(resp: &Response) -> Result<String> {
    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| Error::MalformedResponse("response body is not text".to_string()))
}

/// POST `fields` as multipart form data and parse the reply envelope.
///
/// A parseable envelope is returned whatever the HTTP status, since the
/// server reports validation errors as `400` with `{success: false}`.
pub async fn post_form(url: &str, csrf_token: &str, fields: &[(String, String)]) -> Result<ServerReply> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(js_error)?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let headers = request.headers();
    headers.set(CSRF_HEADER, csrf_token).map_err(js_error)?;
    headers.set("X-Requested-With", "XMLHttpRequest").map_err(js_error)?;

    let resp = send(&request).await?;
    let status = resp.status();
    let body = response_text(&resp).await?;

    match ServerReply::from_json(&body) {
        Ok(reply) => Ok(reply),
        Err(_) if !resp.ok() => Err(Error::Transport(format!("HTTP {} from {}", status, url))),
        Err(e) => {
            console::error!(format!("malformed reply from {}: {}", url, e));
            Err(e)
        }
    }
}

/// GET `url` and deserialize the JSON body
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_error)?;

    let resp = send(&request).await?;
    if !resp.ok() {
        return Err(Error::Transport(format!("HTTP {} from {}", resp.status(), url)));
    }

    let body: js_sys::Promise = resp.json().map_err(js_error)?;
    let json = JsFuture::from(body).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::MalformedResponse(e.to_string()))
}
