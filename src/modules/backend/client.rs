use reqwest::{multipart::Form, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use super::context::CallContext;
use super::envelope::decode;
use super::error::BackendError;
use crate::core::config::BackendConfig;

/// HTTP client for the village REST backend
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .user_agent("DesaPortal/0.1 (village-information-portal)")
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| BackendError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Typed CRUD client for one resource collection (e.g. "wisata")
    pub fn resource<T>(&self, collection: &'static str) -> ResourceClient<'_, T> {
        ResourceClient {
            client: self,
            collection,
            _marker: PhantomData,
        }
    }

    /// Send a request and decode the envelope, aborting if the context is cancelled
    async fn execute<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Option<T>, BackendError> {
        let builder = match ctx.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        tracing::debug!("Backend {} {}", method, path);

        let call = async {
            let response = builder.send().await.map_err(|e| {
                tracing::error!("Backend request {} {} failed: {}", method, path, e);
                BackendError::from_transport(e)
            })?;

            let status = response.status();
            let body = response.bytes().await.map_err(BackendError::from_transport)?;

            if !status.is_success() {
                tracing::warn!("Backend {} {} returned HTTP {}", method, path, status);
            }

            decode::<T>(status, &body)
        };

        tokio::select! {
            biased;
            _ = ctx.cancel_token().cancelled() => {
                tracing::debug!("Backend {} {} cancelled", method, path);
                Err(BackendError::Cancelled)
            }
            result = call => result,
        }
    }

    fn require<T>(data: Option<T>, path: &str) -> Result<T, BackendError> {
        data.ok_or_else(|| BackendError::Server {
            status: 502,
            message: format!("Backend returned no data for {}", path),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        path: &str,
    ) -> Result<T, BackendError> {
        let builder = self.http_client.get(self.url(path));
        let data = self.execute(ctx, Method::GET, path, builder).await?;
        Self::require(data, path)
    }

    /// GET where an absent `data` is meaningful (e.g. empty list)
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        path: &str,
    ) -> Result<Option<T>, BackendError> {
        let builder = self.http_client.get(self.url(path));
        self.execute(ctx, Method::GET, path, builder).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let builder = self.http_client.post(self.url(path)).json(body);
        let data = self.execute(ctx, Method::POST, path, builder).await?;
        Self::require(data, path)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let builder = self.http_client.put(self.url(path)).json(body);
        let data = self.execute(ctx, Method::PUT, path, builder).await?;
        Self::require(data, path)
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let builder = self.http_client.patch(self.url(path)).json(body);
        let data = self.execute(ctx, Method::PATCH, path, builder).await?;
        Self::require(data, path)
    }

    pub async fn delete(&self, ctx: &CallContext, path: &str) -> Result<(), BackendError> {
        let builder = self.http_client.delete(self.url(path));
        self.execute::<serde_json::Value>(ctx, Method::DELETE, path, builder)
            .await
            .map(|_| ())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        path: &str,
        form: Form,
    ) -> Result<T, BackendError> {
        let builder = self.http_client.post(self.url(path)).multipart(form);
        let data = self.execute(ctx, Method::POST, path, builder).await?;
        Self::require(data, path)
    }
}

/// CRUD operations on one backend collection
pub struct ResourceClient<'a, T> {
    client: &'a BackendClient,
    collection: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ResourceClient<'_, T> {
    fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.collection, urlencoding::encode(id))
    }

    pub async fn get_all(&self, ctx: &CallContext) -> Result<Vec<T>, BackendError> {
        let path = format!("/{}", self.collection);
        Ok(self
            .client
            .get_optional::<Vec<T>>(ctx, &path)
            .await?
            .unwrap_or_default())
    }

    pub async fn get_by_id(&self, ctx: &CallContext, id: &str) -> Result<T, BackendError> {
        self.client.get(ctx, &self.item_path(id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        body: &B,
    ) -> Result<T, BackendError> {
        let path = format!("/{}", self.collection);
        self.client.post(ctx, &path, body).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        id: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        self.client.put(ctx, &self.item_path(id), body).await
    }

    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<(), BackendError> {
        self.client.delete(ctx, &self.item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        nama: String,
    }

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: server.uri(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_all_decodes_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wisata"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"id": 1, "nama": "Curug Cipendok"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let items = client
            .resource::<Item>("wisata")
            .get_all(&CallContext::default())
            .await
            .unwrap();

        assert_eq!(
            items,
            vec![Item {
                id: 1,
                nama: "Curug Cipendok".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_bearer_and_body_are_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/wisata/7"))
            .and(header("authorization", "Bearer admin-token"))
            .and(body_json(json!({"nama": "Telaga Sunyi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 7, "nama": "Telaga Sunyi"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ctx = CallContext::default().with_bearer("admin-token");
        let updated = client
            .resource::<Item>("wisata")
            .update(&ctx, "7", &json!({"nama": "Telaga Sunyi"}))
            .await
            .unwrap();

        assert_eq!(updated.nama, "Telaga Sunyi");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/umkm/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "message": "UMKM tidak ditemukan"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .resource::<Item>("umkm")
            .get_by_id(&CallContext::default(), "99")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BackendError::Server { status: 404, ref message } if message == "UMKM tidak ditemukan"
        ));
    }

    #[tokio::test]
    async fn test_cancelled_context_aborts_slow_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/program"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "data": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let root = CancellationToken::new();
        let ctx = CallContext::scoped(&root);

        let canceller = root.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = client
            .resource::<Item>("program")
            .get_all(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Cancelled));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = BackendClient::new(&BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(1),
        })
        .unwrap();

        let err = client
            .resource::<Item>("laporan")
            .get_all(&CallContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Network(_)));
    }
}
