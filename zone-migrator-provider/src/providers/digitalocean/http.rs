//! DigitalOcean HTTP 请求方法

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, is_success};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DigitalOceanProvider;
use super::types::DoErrorBody;

impl DigitalOceanProvider {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.bearer_auth(token)
    }

    /// 序列化请求体（失败时返回 `SerializationError`）
    fn encode_body<B: Serialize>(&self, body: &B) -> Result<String> {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })
    }

    /// 将非 2xx 响应转换为统一错误
    pub(crate) fn api_error(
        &self,
        status: u16,
        response_text: &str,
        context: ErrorContext,
    ) -> ProviderError {
        let raw = match serde_json::from_str::<DoErrorBody>(response_text) {
            Ok(body) => RawApiError::with_code(status, body.id, body.message),
            Err(_) => RawApiError::new(status, format!("HTTP {status}")),
        };
        let err = self.map_error(raw, context);
        if err.is_expected() {
            log::warn!("API 错误: {err}");
        } else {
            log::error!("API 错误: {err}");
        }
        err
    }

    /// 检查状态码并解析 JSON 响应
    fn decode<T: DeserializeOwned>(
        &self,
        status: u16,
        response_text: &str,
        context: ErrorContext,
    ) -> Result<T> {
        if !is_success(status) {
            return Err(self.api_error(status, response_text, context));
        }
        HttpUtils::parse_json(response_text, self.provider_name())
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let builder = Self::authorized(self.client.get(&url), token);
        let (status, text) =
            HttpUtils::execute_request(builder, self.provider_name(), "GET", &url).await?;
        self.decode(status, &text, context)
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let body_json = self.encode_body(body)?;
        log::debug!("Request Body: {body_json}");

        let builder = Self::authorized(self.client.post(&url), token)
            .header(CONTENT_TYPE, "application/json")
            .body(body_json);
        let (status, text) =
            HttpUtils::execute_request(builder, self.provider_name(), "POST", &url).await?;
        self.decode(status, &text, context)
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let body_json = self.encode_body(body)?;
        log::debug!("Request Body: {body_json}");

        let builder = Self::authorized(self.client.patch(&url), token)
            .header(CONTENT_TYPE, "application/json")
            .body(body_json);
        let (status, text) =
            HttpUtils::execute_request(builder, self.provider_name(), "PATCH", &url).await?;
        self.decode(status, &text, context)
    }

    /// 执行 DELETE 请求，返回原始状态码与响应体（由调用方解释）
    pub(crate) async fn delete_raw(&self, token: &str, path: &str) -> Result<(u16, String)> {
        let url = self.url(path);
        let builder = Self::authorized(self.client.delete(&url), token);
        HttpUtils::execute_request(builder, self.provider_name(), "DELETE", &url).await
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, token: &str, path: &str, context: ErrorContext) -> Result<()> {
        let (status, text) = self.delete_raw(token, path).await?;
        if is_success(status) {
            Ok(())
        } else {
            Err(self.api_error(status, &text, context))
        }
    }
}
