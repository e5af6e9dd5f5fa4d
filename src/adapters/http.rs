use crate::domain::ports::{Params, Transport};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, query: &Params) -> Result<String> {
        tracing::debug!("GET {} ({} params)", url, query.len());
        let response = self.client.get(url).query(query).send().await?;

        tracing::debug!("Carrier response status: {}", response.status());
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }

    async fn post(&self, url: &str, body: &Params) -> Result<String> {
        tracing::debug!("POST {} ({} fields)", url, body.len());
        let response = self.client.post(url).form(body).send().await?;

        tracing::debug!("Carrier response status: {}", response.status());
        let text = response.error_for_status()?.text().await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{CorreiosError, ErrorKind};
    use httpmock::prelude::*;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5), "correios-test").unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_query_string() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/calc")
                .query_param("sCepOrigem", "01310100")
                .query_param("StrRetorno", "xml");
            then.status(200).body("<Servicos></Servicos>");
        });

        let mut query = Params::new();
        query.insert("sCepOrigem".to_string(), "01310100".to_string());
        query.insert("StrRetorno".to_string(), "xml".to_string());

        let body = transport().get(&server.url("/calc"), &query).await.unwrap();

        api_mock.assert();
        assert_eq!(body, "<Servicos></Servicos>");
    }

    #[tokio::test]
    async fn test_post_sends_form_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/busca")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("relaxation=70040010");
            then.status(200).body("<html></html>");
        });

        let mut form = Params::new();
        form.insert("relaxation".to_string(), "70040010".to_string());

        let body = transport().post(&server.url("/busca"), &form).await.unwrap();

        api_mock.assert();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_http_error_is_transport_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/down");
            then.status(503);
        });

        let err = transport()
            .get(&server.url("/down"), &Params::new())
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, CorreiosError::HttpError(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
