//! Derivation of a new collection value from the current one plus a single
//! server response. None of these re-fetch or reorder anything.

use shared::domain::{Repository, RepositoryId};

pub fn replace_all(received: Vec<Repository>) -> Vec<Repository> {
    received
}

pub fn append(current: &[Repository], created: Repository) -> Vec<Repository> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(created);
    next
}

/// Swaps in `updated` at the position of the element sharing its id. Returns
/// `false` when no element matched; `updated` is then dropped.
pub fn replace_by_id(current: &[Repository], updated: &Repository) -> (Vec<Repository>, bool) {
    let mut replaced = false;
    let next = current
        .iter()
        .map(|repository| {
            if repository.id == updated.id {
                replaced = true;
                updated.clone()
            } else {
                repository.clone()
            }
        })
        .collect();
    (next, replaced)
}

/// Filters out every element with `id` and reports how many went.
pub fn remove_by_id(current: &[Repository], id: &RepositoryId) -> (Vec<Repository>, usize) {
    let next: Vec<Repository> = current
        .iter()
        .filter(|repository| &repository.id != id)
        .cloned()
        .collect();
    let removed = current.len() - next.len();
    (next, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: i64, likes: u64) -> Repository {
        Repository {
            id: RepositoryId::Number(id),
            title: format!("repo-{id}"),
            url: format!("https://github.com/example/{id}"),
            techs: vec!["Rust".into()],
            likes,
        }
    }

    #[test]
    fn append_keeps_prior_elements_in_order() {
        let current = vec![repo(1, 0), repo(2, 4)];
        let next = append(&current, repo(3, 0));
        assert_eq!(next[..2], current[..]);
        assert_eq!(next.last(), Some(&repo(3, 0)));
    }

    #[test]
    fn replace_by_id_preserves_position() {
        let current = vec![repo(1, 0), repo(2, 0), repo(3, 0)];
        let (next, replaced) = replace_by_id(&current, &repo(2, 5));
        assert!(replaced);
        assert_eq!(next, vec![repo(1, 0), repo(2, 5), repo(3, 0)]);
    }

    #[test]
    fn replace_by_id_without_match_is_a_no_op() {
        let current = vec![repo(1, 0)];
        let (next, replaced) = replace_by_id(&current, &repo(9, 1));
        assert!(!replaced);
        assert_eq!(next, current);
    }

    #[test]
    fn remove_by_id_reports_count() {
        let current = vec![repo(1, 0), repo(2, 0), repo(3, 0)];
        let (next, removed) = remove_by_id(&current, &RepositoryId::Number(2));
        assert_eq!(removed, 1);
        assert_eq!(next, vec![repo(1, 0), repo(3, 0)]);

        let (unchanged, removed) = remove_by_id(&next, &RepositoryId::Number(2));
        assert_eq!(removed, 0);
        assert_eq!(unchanged, next);
    }

    #[test]
    fn remove_by_id_filters_every_duplicate() {
        let current = vec![repo(1, 0), repo(1, 2), repo(2, 0)];
        let (next, removed) = remove_by_id(&current, &RepositoryId::Number(1));
        assert_eq!(removed, 2);
        assert_eq!(next, vec![repo(2, 0)]);
    }

    #[test]
    fn ids_of_different_shape_do_not_match() {
        let current = vec![repo(1, 0)];
        let (next, removed) = remove_by_id(&current, &RepositoryId::Text("1".into()));
        assert_eq!(removed, 0);
        assert_eq!(next, current);
    }
}
