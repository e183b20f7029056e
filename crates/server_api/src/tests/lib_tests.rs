use super::*;

fn request(title: &str) -> CreateRepositoryRequest {
    CreateRepositoryRequest {
        title: title.to_string(),
        url: "https://github.com/xggax".into(),
        techs: vec!["ReactJS".into(), "React Native".into(), "NodeJs".into()],
    }
}

#[tokio::test]
async fn blank_title_is_a_validation_error() {
    let ctx = ApiContext::default();
    let err = create_repository(&ctx, request("   "))
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::Validation));
    assert!(list_repositories(&ctx).await.expect("list").is_empty());
}

#[tokio::test]
async fn created_repository_keeps_techs_order() {
    let ctx = ApiContext::default();
    let created = create_repository(&ctx, request("New Project"))
        .await
        .expect("create");
    assert_eq!(
        created.techs,
        vec![
            "ReactJS".to_string(),
            "React Native".to_string(),
            "NodeJs".to_string()
        ]
    );
    assert_eq!(created.likes, 0);
}

#[tokio::test]
async fn like_and_delete_unknown_ids_map_to_not_found() {
    let ctx = ApiContext::default();
    let err = like_repository(&ctx, "missing")
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::NotFound));

    let err = delete_repository(&ctx, "missing")
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::NotFound));
}

#[tokio::test]
async fn concurrent_likes_are_all_counted() {
    let ctx = ApiContext::default();
    let created = create_repository(&ctx, request("Hot"))
        .await
        .expect("create");
    let id = created.id.to_string();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let ctx = ctx.clone();
        let id = id.clone();
        tasks.push(tokio::spawn(async move {
            like_repository(&ctx, &id).await.expect("like");
        }));
    }
    for task in tasks {
        task.await.expect("join");
    }

    let listed = list_repositories(&ctx).await.expect("list");
    assert_eq!(listed[0].likes, 20);
}
