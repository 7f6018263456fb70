use foodgram_shared::{Error, PageArgs};
use foodgram_user::{query, query_subscriptions};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_self_subscription_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.path()).await?;
    let john = helpers::register(&cmd, "john").await?;
    let jane = helpers::register(&cmd, "jane").await?;

    let err = cmd.subscribe(john, john).await.unwrap_err();
    assert_eq!(err.to_string(), "You cannot subscribe to yourself.");

    cmd.subscribe(john, jane).await?;

    let err = cmd.subscribe(john, john).await.unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));

    Ok(())
}

#[tokio::test]
async fn test_subscribe_toggle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.path()).await?;
    let john = helpers::register(&cmd, "john").await?;
    let jane = helpers::register(&cmd, "jane").await?;
    let bob = helpers::register(&cmd, "bob").await?;

    let author = cmd.subscribe(john, jane).await?;
    assert_eq!(author.id, jane);
    assert!(query::is_subscribed(&cmd.read_db, john, jane).await?);
    assert!(!query::is_subscribed(&cmd.read_db, jane, john).await?);

    let err = cmd.subscribe(john, jane).await.unwrap_err();
    assert_eq!(err.to_string(), "You are already subscribed to this author.");

    cmd.subscribe(john, bob).await?;

    let page = query_subscriptions(&cmd.read_db, john, &PageArgs::default()).await?;
    assert_eq!(page.count, 2);
    assert_eq!(
        page.rows.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![bob, jane]
    );

    cmd.unsubscribe(john, jane).await?;
    let err = cmd.unsubscribe(john, jane).await.unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));

    let err = cmd.subscribe(john, 999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound));

    Ok(())
}

#[tokio::test]
async fn test_deleting_user_cascades() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.path()).await?;
    let john = helpers::register(&cmd, "john").await?;
    let jane = helpers::register(&cmd, "jane").await?;
    cmd.subscribe(john, jane).await?;

    sqlx::query("DELETE FROM user WHERE id = ?1")
        .bind(jane)
        .execute(&cmd.write_db)
        .await?;

    let page = query_subscriptions(&cmd.read_db, john, &PageArgs::default()).await?;
    assert_eq!(page.count, 0);

    Ok(())
}
