use super::*;
use crate::state::session::Role;

fn user(email: &str, is_verified: bool, is_blocked: bool) -> UserSummary {
    UserSummary { email: email.to_owned(), name: "N".to_owned(), role: Role::User, is_verified, is_blocked }
}

#[test]
fn sorted_users_orders_by_email() {
    let users = sorted_users(vec![user("c@x.io", true, false), user("a@x.io", true, false), user("b@x.io", true, false)]);
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["a@x.io", "b@x.io", "c@x.io"]);
}

#[test]
fn block_action_label_offers_the_opposite_state() {
    assert_eq!(block_action_label(&user("a@x.io", true, false)), "Block");
    assert_eq!(block_action_label(&user("a@x.io", true, true)), "Unblock");
}

#[test]
fn status_label_puts_blocked_first() {
    assert_eq!(status_label(&user("a@x.io", false, true)), "blocked");
    assert_eq!(status_label(&user("a@x.io", true, false)), "active");
    assert_eq!(status_label(&user("a@x.io", false, false)), "unverified");
}
