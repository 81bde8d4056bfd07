use reqwest::Response;

pub async fn get(url: &str) -> Response {
    reqwest::Client::builder().build().unwrap().get(url).send().await.unwrap()
}

pub async fn get_with_header(url: &str, key: &str, value: &str) -> Response {
    reqwest::Client::builder()
        .build()
        .unwrap()
        .get(url)
        .header(key, value)
        .send()
        .await
        .unwrap()
}
