use log::debug;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::FetchError;

fn js_message(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			value
				.dyn_ref::<js_sys::Error>()
				.map(|e| String::from(e.message()))
		})
		.unwrap_or_else(|| format!("{value:?}"))
}

/// `GET url` and decode the JSON body. The body is decoded whatever the
/// status, since the backend reports failures as JSON.
pub async fn get_json<T: DeserializeOwned>(url: &str, ajax: bool) -> Result<T, FetchError> {
	let transport = |e: JsValue| FetchError::Transport {
		url: url.to_string(),
		message: js_message(&e),
	};
	let window = web_sys::window().ok_or(FetchError::NoWindow)?;

	let init = RequestInit::new();
	init.set_method("GET");
	if ajax {
		let headers = Headers::new().map_err(transport)?;
		headers
			.set("X-Requested-With", "XMLHttpRequest")
			.map_err(transport)?;
		init.set_headers(&headers);
	}
	let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;

	debug!("GET {url}");
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(transport)?
		.dyn_into()
		.map_err(transport)?;
	if !response.ok() {
		debug!("GET {url} answered {}", response.status());
	}

	let text = JsFuture::from(response.text().map_err(transport)?)
		.await
		.map_err(transport)?
		.as_string()
		.unwrap_or_default();
	Ok(serde_json::from_str(&text)?)
}
