//! Plain-text rendering of a collection snapshot.

use client_core::CollectionSnapshot;
use shared::domain::Repository;

/// "1 like", otherwise plural, including "0 likes".
pub fn likes_label(likes: u64) -> String {
    if likes == 1 {
        format!("{likes} like")
    } else {
        format!("{likes} likes")
    }
}

pub fn render_repository(repository: &Repository) -> String {
    let mut out = format!("[{}] {}\n", repository.id, repository.title);
    if !repository.url.is_empty() {
        out.push_str(&format!("    {}\n", repository.url));
    }
    if !repository.techs.is_empty() {
        out.push_str(&format!("    techs: {}\n", repository.techs.join(", ")));
    }
    out.push_str(&format!("    {}\n", likes_label(repository.likes)));
    out
}

pub fn render_snapshot(snapshot: &CollectionSnapshot) -> String {
    if snapshot.is_empty() {
        return "No repositories.\n".to_string();
    }
    snapshot.iter().map(render_repository).collect()
}
