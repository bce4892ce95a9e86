//! Walks through a full session lifecycle—first-run hydration, login, profile
//! display, logout—against in-process collaborators.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use time::Duration;
// self
use session_gate::{
	auth::{Credentials, Profile, SubjectId},
	gateway::{GatewayError, GatewayFuture, IdentityGateway, LoginOutcome},
	session::Session,
	store::{CredentialStore, MemoryStore},
};

/// Stand-in for a hosted login page that authenticates instantly.
struct DemoGateway;
impl IdentityGateway for DemoGateway {
	fn present_login(&self) -> GatewayFuture<'_, LoginOutcome> {
		Box::pin(async {
			let credentials = Credentials::builder()
				.access_token("demo-access-token")
				.refresh_token("demo-refresh-token")
				.expires_in(Duration::hours(1))
				.build()
				.expect("Demo credentials should build successfully.");

			LoginOutcome::Authenticated(credentials)
		})
	}

	fn fetch_user_info<'a>(
		&'a self,
		_access_token: &'a str,
	) -> GatewayFuture<'a, Result<Profile, GatewayError>> {
		Box::pin(async {
			Ok(Profile {
				sub: SubjectId::new("demo|42").expect("Demo subject should be valid."),
				name: Some("Demo User".into()),
				nickname: None,
				email: Some("demo@example.com".into()),
				picture: None,
			})
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::default());
	let gateway: Arc<dyn IdentityGateway> = Arc::new(DemoGateway);
	let mut session = Session::new(store, gateway);

	// Nothing persisted yet, so hydration reports first-run.
	if session.hydrate().await.is_err() {
		println!("No saved session; presenting the login prompt.");
	}

	session.request_login().await?;

	if let Some(profile) = session.profile() {
		println!("Signed in as {} ({}).", profile.display_name(), profile.sub);
	}

	println!("Login prompts presented: {}.", session.metrics.attempts());

	session.request_logout().await?;

	println!("Signed out; session state is {:?}.", session.state());

	Ok(())
}
