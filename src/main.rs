#[tokio::main]
async fn main() -> anyhow::Result<()> {
    text2pinyin_lib::run().await
}
