//! Display-side Visibility
//!
//! Narrows a loaded page to what the current actor should see. This is a
//! presentation filter only. The server decides what a caller may read; a
//! record that reaches the client has already been released to it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::entity::Entity;

/// Marketplace role of the signed-in actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Guest,
    Host,
    Guide,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Host => "Host",
            Role::Guide => "Guide",
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super admin",
        }
    }
}

/// Read-only identity of the current actor, injected into each screen
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorContext {
    pub user_id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

impl ActorContext {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            access_token: None,
        }
    }

    pub fn is(&self, user_id: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == user_id
    }
}

impl fmt::Debug for ActorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorContext")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Items with a per-actor display rule
pub trait Visible: Entity {
    fn visible_to(&self, actor: &ActorContext) -> bool;
}

/// Items `actor` should see, in loaded order. Super admins see everything.
pub fn visible_items<'a, T: Visible>(items: &'a [T], actor: &ActorContext) -> Vec<&'a T> {
    if actor.role == Role::SuperAdmin {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.visible_to(actor)).collect()
}

/// First occurrence of each id, in loaded order.
///
/// Appended pages can repeat items when remote ordering shifts between
/// requests; screens that care call this before rendering.
pub fn dedup_by_id<T: Entity>(items: &[T]) -> Vec<&T> {
    let mut seen = HashSet::new();
    items.iter().filter(|item| seen.insert(item.id())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: &'static str,
        owner: &'static str,
    }

    impl Entity for Ticket {
        type Id = &'static str;
        fn id(&self) -> &'static str {
            self.id
        }
    }

    impl Visible for Ticket {
        fn visible_to(&self, actor: &ActorContext) -> bool {
            actor.is(self.owner)
        }
    }

    fn tickets() -> Vec<Ticket> {
        vec![
            Ticket { id: "t1", owner: "u1" },
            Ticket { id: "t2", owner: "u2" },
            Ticket { id: "t3", owner: "u1" },
        ]
    }

    #[test]
    fn test_owner_sees_own_items() {
        let items = tickets();
        let actor = ActorContext::new("u1", Role::Host);
        let ids: Vec<_> = visible_items(&items, &actor).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let items = tickets();
        let actor = ActorContext::new("root", Role::SuperAdmin);
        assert_eq!(visible_items(&items, &actor).len(), 3);
    }

    #[test]
    fn test_anonymous_sees_nothing_owned() {
        let items = tickets();
        let actor = ActorContext::default();
        assert!(visible_items(&items, &actor).is_empty());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut items = tickets();
        items.push(Ticket { id: "t2", owner: "u9" });
        let deduped = dedup_by_id(&items);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[1].owner, "u2");
    }

    #[test]
    fn test_actor_from_session_json() {
        let actor: ActorContext =
            serde_json::from_str(r#"{"userId":"u7","role":"super_admin","accessToken":"tok"}"#).unwrap();
        assert_eq!(actor.role, Role::SuperAdmin);
        assert_eq!(actor.access_token.as_deref(), Some("tok"));
        assert!(!serde_json::to_string(&actor).unwrap().contains("tok"));
    }

    #[test]
    fn test_debug_hides_access_token() {
        let mut actor = ActorContext::new("u7", Role::Admin);
        actor.access_token = Some("secret-bearer".to_string());
        let printed = format!("{:?}", actor);
        assert!(printed.contains("u7"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("secret-bearer"));
    }

    #[test]
    fn test_stats_follow_visible_rows() {
        use crate::collection::{FetchMode, PagedCollection};
        use crate::page::Page;
        use crate::query::QueryState;
        use crate::stats::Selectors;

        let mut collection = PagedCollection::new(QueryState::new(10));
        let ticket = collection.begin_fetch(FetchMode::Replace);
        collection.complete_fetch(ticket, Ok(Page::new(tickets())));

        let selectors = Selectors::<Ticket>::new().count("count").count_where("t1", |t| t.id == "t1");
        let mine = collection.visible_stats(&ActorContext::new("u2", Role::Host), &selectors);
        assert_eq!(mine.value("count"), 1.0);
        assert_eq!(mine.value("t1"), 0.0);

        let all = collection.visible_stats(&ActorContext::new("root", Role::SuperAdmin), &selectors);
        assert_eq!(all.value("count"), 3.0);
        assert_eq!(all.value("t1"), 1.0);
    }
}
