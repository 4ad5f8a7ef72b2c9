use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{Bill, BillSubmission, CreatedReceipt};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::services::logging::Logger;
use crate::services::store::{BillStore, ReceiptUpload, StoreError};

/// HTTP client for the bills REST API
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the bearer token sent with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn bills_url(&self) -> String {
        format!("{}/bills", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Logger::warn_with_component("api", &format!("{} {}: {}", response.url(), status, body));
            return Err(StoreError::Status { status });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn receipt_form(upload: &ReceiptUpload) -> Result<FormData, StoreError> {
        let content = js_sys::Uint8Array::from(upload.content.as_slice());
        let parts = js_sys::Array::of1(&content);
        let options = BlobPropertyBag::new();
        options.set_type(&upload.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", &blob, &upload.file_name)
            .map_err(js_error)?;
        form.append_with_str("email", &upload.email).map_err(js_error)?;
        Ok(form)
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Encode(format!("{:?}", value))
}

#[async_trait(?Send)]
impl BillStore for ApiClient {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let response = self
            .authorize(Request::get(&self.bills_url()))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedReceipt, StoreError> {
        // No explicit content type: the browser sets the multipart boundary
        let form = Self::receipt_form(&upload)?;
        let response = self
            .authorize(Request::post(&self.bills_url()))
            .body(form)
            .map_err(|e| StoreError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn update(&self, selector: Option<&str>, bill: &BillSubmission) -> Result<Bill, StoreError> {
        let selector = selector.ok_or(StoreError::MissingSelector)?;
        let url = format!("{}/{}", self.bills_url(), selector);

        let response = self
            .authorize(Request::patch(&url))
            .json(bill)
            .map_err(|e| StoreError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::read_json(response).await
    }
}
