use crate::helpers::TestApp;

#[tokio::test]
async fn unknown_paths_serve_the_frontend_entry_page() {
    let test_app = TestApp::spawn_app().await;

    std::fs::create_dir_all(&test_app.frontend_path).unwrap();
    std::fs::write(
        test_app.frontend_path.join("index.html"),
        "<!doctype html><div id=\"root\"></div>",
    )
    .unwrap();

    for page in ["/", "/Unsubscribe", "/already_unsubscribed"] {
        let response = reqwest::get(&format!("{}{}", test_app.address, page))
            .await
            .unwrap();

        assert_eq!(200, response.status().as_u16(), "{} was not served", page);
        assert!(response.text().await.unwrap().contains("id=\"root\""));
    }
}

#[tokio::test]
async fn missing_frontend_bundle_returns_404() {
    let test_app = TestApp::spawn_app().await;

    let response = reqwest::get(&format!("{}/Unsubscribe", test_app.address))
        .await
        .unwrap();

    assert_eq!(404, response.status().as_u16());
}
