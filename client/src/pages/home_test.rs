use super::*;
use crate::state::session::Role;

#[test]
fn account_summary_describes_role_provider_and_verification() {
    let session = Session { role: Role::User, is_verified: true, is_blocked: false, provider: Provider::Local };
    assert_eq!(account_summary(&session), "Signed in as user with email and password; email verified.");

    let google = Session { provider: Provider::Google, is_verified: false, ..session };
    assert_eq!(account_summary(&google), "Signed in as user with Google; email not verified yet.");
}
