//! Demonstrates hydration: the first run logs in and persists credentials to a
//! file-backed store, the simulated restart restores the session without
//! presenting a prompt.

// std
use std::{env, process, sync::Arc};
// crates.io
use color_eyre::Result;
use time::Duration;
// self
use session_gate::{
	auth::{Credentials, Profile, SubjectId},
	gateway::{GatewayError, GatewayFuture, IdentityGateway, LoginOutcome},
	session::Session,
	store::{CredentialStore, FileStore},
};

struct DemoGateway;
impl IdentityGateway for DemoGateway {
	fn present_login(&self) -> GatewayFuture<'_, LoginOutcome> {
		Box::pin(async {
			let credentials = Credentials::builder()
				.access_token("restore-access-token")
				.refresh_token("restore-refresh-token")
				.expires_in(Duration::hours(8))
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
				sub: SubjectId::new("demo|restore").expect("Demo subject should be valid."),
				name: Some("Restored User".into()),
				nickname: None,
				email: None,
				picture: None,
			})
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let snapshot_path =
		env::temp_dir().join(format!("session_gate_demo_{}.json", process::id()));
	let gateway: Arc<dyn IdentityGateway> = Arc::new(DemoGateway);

	// First run: the store is empty, so the user has to sign in.
	{
		let store: Arc<dyn CredentialStore> = Arc::new(FileStore::open(&snapshot_path)?);
		let mut session = Session::new(store, gateway.clone());

		if session.hydrate().await.is_err() {
			println!("First run; no snapshot at {}.", snapshot_path.display());
			session.request_login().await?;
			println!("Signed in and persisted the credential bundle.");
		}
	}

	// Simulated restart: a fresh session over the same snapshot restores
	// without presenting a prompt.
	{
		let store: Arc<dyn CredentialStore> = Arc::new(FileStore::open(&snapshot_path)?);
		let mut session = Session::new(store, gateway);
		let hydration = session.hydrate().await?;

		println!(
			"Restored session for {} (profile ready: {}).",
			session
				.profile()
				.map(Profile::display_name)
				.unwrap_or("an unknown user"),
			hydration.profile_ready,
		);

		session.request_logout().await?;
	}

	std::fs::remove_file(&snapshot_path).ok();
	println!("Cleaned up {}.", snapshot_path.display());

	Ok(())
}
