//! Fetches a live user profile from a hosted tenant's user-info endpoint.
//!
//! Usage: `cargo run --example user_info_fetch -- <tenant-domain> <access-token>`
//! e.g. `cargo run --example user_info_fetch -- dev-07apz4jq.auth0.com eyJh...`

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use session_gate::{
	auth::ProviderId,
	gateway::UserInfoClient,
	provider::ProviderDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let domain = args.next().ok_or_else(|| eyre!("missing <tenant-domain> argument"))?;
	let access_token = args.next().ok_or_else(|| eyre!("missing <access-token> argument"))?;
	let descriptor = ProviderDescriptor::from_domain(ProviderId::new("demo-tenant")?, &domain)?;
	let client = UserInfoClient::new(descriptor);
	let profile = client.fetch(&access_token).await?;

	println!("Subject: {}.", profile.sub);
	println!("Display name: {}.", profile.display_name());

	if let Some(email) = &profile.email {
		println!("Email: {email}.");
	}
	if let Some(picture) = &profile.picture {
		println!("Picture: {picture}.");
	}

	Ok(())
}
