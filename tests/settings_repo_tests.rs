// SettingsRepo tests: connect, init, selected camera round trip

use printdash::settings_repo::SettingsRepo;
use tempfile::TempDir;

async fn repo(dir: &TempDir) -> SettingsRepo {
    let path = dir.path().join("nested").join("settings.db");
    let repo = SettingsRepo::connect(path.to_str().unwrap()).await.unwrap();
    repo.init().await.unwrap();
    repo
}

#[tokio::test]
async fn settings_repo_connect_and_init_twice() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir).await;
    // Second init is no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
    assert_eq!(repo.get_selected_camera_uid().await.unwrap(), None);
}

#[tokio::test]
async fn settings_repo_set_overwrite_and_clear() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir).await;

    repo.set_selected_camera_uid(Some("cam-a")).await.unwrap();
    assert_eq!(
        repo.get_selected_camera_uid().await.unwrap().as_deref(),
        Some("cam-a")
    );

    repo.set_selected_camera_uid(Some("cam-b")).await.unwrap();
    assert_eq!(
        repo.get_selected_camera_uid().await.unwrap().as_deref(),
        Some("cam-b")
    );

    repo.set_selected_camera_uid(None).await.unwrap();
    assert_eq!(repo.get_selected_camera_uid().await.unwrap(), None);
}

#[tokio::test]
async fn settings_repo_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    {
        let repo = repo(&dir).await;
        repo.set_selected_camera_uid(Some("kept")).await.unwrap();
    }
    let repo = repo(&dir).await;
    assert_eq!(
        repo.get_selected_camera_uid().await.unwrap().as_deref(),
        Some("kept")
    );
}
