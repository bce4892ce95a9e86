#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use time::Duration;
use url::Url;
// self
use session_gate::{
	auth::{Credentials, ProviderId},
	error::Error,
	gateway::{GatewayError, GatewayFuture, IdentityGateway, LoginOutcome, UserInfoClient},
	provider::ProviderDescriptor,
	session::{LoginConclusion, Session, SessionState},
	store::{CredentialStore, MemoryStore},
};

const ACCESS_TOKEN: &str = "access-it";

fn build_descriptor(server: &MockServer) -> ProviderDescriptor {
	let provider_id = ProviderId::new("mock-http")
		.expect("Provider identifier should be valid for user-info tests.");
	let endpoint = Url::parse(&server.url("/userinfo"))
		.expect("Mock user-info endpoint should parse successfully.");

	ProviderDescriptor::new(provider_id, endpoint)
		.expect("Loopback mock endpoint should pass descriptor validation.")
}

fn build_credentials() -> Credentials {
	Credentials::builder()
		.access_token(ACCESS_TOKEN)
		.expires_in(Duration::hours(1))
		.build()
		.expect("Credential fixture should build successfully.")
}

/// Gateway pairing an instantly authenticating prompt with a real user-info
/// client, the shape an application embedding a hosted login page ends up with.
struct HostedGateway {
	user_info: UserInfoClient,
}
impl IdentityGateway for HostedGateway {
	fn present_login(&self) -> GatewayFuture<'_, LoginOutcome> {
		Box::pin(async { LoginOutcome::Authenticated(build_credentials()) })
	}

	fn fetch_user_info<'a>(
		&'a self,
		access_token: &'a str,
	) -> GatewayFuture<'a, Result<session_gate::auth::Profile, GatewayError>> {
		Box::pin(self.user_info.fetch(access_token))
	}
}

#[tokio::test]
async fn fetch_deserializes_the_user_info_document() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/userinfo")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"));
			then.status(200).header("content-type", "application/json").body(
				"{\"sub\":\"auth0|5cc7242513f60f11c4e58a71\",\"name\":\"Phillipp Aitken\",\"picture\":\"https://cdn.example.com/a.png\"}",
			);
		})
		.await;
	let client = UserInfoClient::new(build_descriptor(&server));
	let profile = client.fetch(ACCESS_TOKEN).await.expect("User-info fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.sub.as_ref(), "auth0|5cc7242513f60f11c4e58a71");
	assert_eq!(profile.display_name(), "Phillipp Aitken");
	assert_eq!(profile.email, None);
}

#[tokio::test]
async fn fetch_classifies_provider_rejections() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/userinfo");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_token\"}");
		})
		.await;

	let client = UserInfoClient::new(build_descriptor(&server));
	let err =
		client.fetch("stale-token").await.expect_err("Rejected token should surface an error.");

	match err {
		GatewayError::Provider { message, status } => {
			assert_eq!(status, Some(401));
			assert!(message.contains("invalid_token"), "preview missing: {message}");
		},
		other => panic!("expected a provider rejection, got {other:?}"),
	}
}

#[tokio::test]
async fn fetch_reports_malformed_documents_with_paths() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/userinfo");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"sub\":\"auth0|ok\",\"picture\":42}");
		})
		.await;

	let client = UserInfoClient::new(build_descriptor(&server));
	let err = client
		.fetch(ACCESS_TOKEN)
		.await
		.expect_err("Malformed document should surface a parse error.");

	match err {
		GatewayError::MalformedUserInfo { source, status } => {
			assert_eq!(status, Some(200));
			assert_eq!(source.path().to_string(), "picture");
		},
		other => panic!("expected a malformed-user-info error, got {other:?}"),
	}
}

#[tokio::test]
async fn login_flow_hydrates_profile_from_the_wire() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/userinfo")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"sub\":\"auth0|wire\",\"nickname\":\"wire\"}");
		})
		.await;

	let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::default());
	let gateway: Arc<dyn IdentityGateway> =
		Arc::new(HostedGateway { user_info: UserInfoClient::new(build_descriptor(&server)) });
	let mut session = Session::new(store, gateway);
	let conclusion = session.request_login().await.expect("Wire-backed login should succeed.");

	assert_eq!(conclusion, LoginConclusion::SignedIn { profile_ready: true });
	assert_eq!(session.state(), SessionState::LoggedIn);
	assert_eq!(
		session.profile().map(|profile| profile.display_name()),
		Some("wire"),
	);
}

#[tokio::test]
async fn profile_errors_wrap_gateway_failures() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/userinfo");
			then.status(503).body("upstream melted");
		})
		.await;

	let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::default());
	let gateway: Arc<dyn IdentityGateway> =
		Arc::new(HostedGateway { user_info: UserInfoClient::new(build_descriptor(&server)) });
	let mut session = Session::new(store, gateway);
	let conclusion =
		session.request_login().await.expect("Login should survive a profile outage.");

	assert_eq!(conclusion, LoginConclusion::SignedIn { profile_ready: false });

	let err = session.fetch_profile().await.expect_err("Profile retry should keep failing.");

	assert!(matches!(err, Error::ProfileFetchFailed { .. }));
	assert_eq!(session.state(), SessionState::LoggedIn);
}
