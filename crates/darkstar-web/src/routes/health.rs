pub async fn heartbeat() -> &'static str {
    "I am alive!"
}
