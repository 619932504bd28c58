use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::app_config::exchange::{Credentials, ExchangeConfig};
use crate::error::{ApiError, AppResult};

#[derive(Serialize, Deserialize, Debug)]
struct ErrorResponse {
    code: i64,
    msg: String,
}

/// Binance U本位合约 REST 客户端
pub struct BinanceClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
    recv_window_ms: u64,
}

impl BinanceClient {
    pub fn new(config: &ExchangeConfig) -> AppResult<Self> {
        config.validate()?;
        let credentials = config.credentials()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Transport)?;
        Ok(BinanceClient {
            client,
            credentials,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recv_window_ms: config.recv_window_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 签名：对完整 query string 做 HMAC-SHA256，输出小写 hex
    pub fn generate_signature(&self, payload: &str) -> String {
        sign(&self.credentials.api_secret, payload)
    }

    /// 需要签名的接口，query 为已编码的业务参数
    pub(crate) async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &str,
    ) -> Result<T, ApiError> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let payload = signed_payload(query, self.recv_window_ms, timestamp);
        let signature = self.generate_signature(&payload);

        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, path, payload, signature
        );
        debug!("send binance signed request: {} {}?{}", method, path, payload);

        let request_builder = self
            .client
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.credentials.api_key);
        self.execute(path, request_builder).await
    }

    /// 公共接口，无需签名
    pub(crate) async fn send_public<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &str,
    ) -> Result<T, ApiError> {
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };
        debug!("send binance public request: {} {}", method, path);
        self.execute(path, self.client.request(method, &url)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request_builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request_builder.send().await?;

        let status_code = response.status();
        let response_body = response.text().await?;
        debug!("path:{},binance_response: {}", path, response_body);

        if status_code.is_success() {
            let result: T = serde_json::from_str(&response_body)?;
            Ok(result)
        } else {
            match serde_json::from_str::<ErrorResponse>(&response_body) {
                Ok(error) => Err(ApiError::Rejected {
                    status: status_code,
                    code: error.code,
                    msg: error.msg,
                }),
                Err(_) => Err(ApiError::Http {
                    status: status_code,
                    body: response_body,
                }),
            }
        }
    }
}

fn signed_payload(query: &str, recv_window_ms: u64, timestamp: i64) -> String {
    let suffix = format!("recvWindow={}&timestamp={}", recv_window_ms, timestamp);
    if query.is_empty() {
        suffix
    } else {
        format!("{}&{}", query, suffix)
    }
}

pub(crate) fn sign(secret: &str, payload: &str) -> String {
    // HMAC 接受任意长度的 key
    let mut hmac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    hmac.update(payload.as_bytes());
    hex::encode(hmac.finalize().into_bytes())
}
