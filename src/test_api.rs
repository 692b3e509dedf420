// API 测试工具 - 向运行中的服务发送示例句子
use anyhow::Result;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

const NORMALIZE_SAMPLES: &[&str] = &[
    "电影中梁朝伟扮演的陈永仁的编号27149",
    "这块黄金重达324.75克",
    "我们班的最高总分为583分",
    "12~23、-1.5~2",
    "她出生于86年8月18日，她弟弟出生于1995年3月1日",
    "等会请在12:05请通知我",
    "今天的最低气温达到-10°C",
    "现场有7/12的观众投出了赞成票",
    "明天有62％的概率降雨",
    "随便来几个价格12块5，34.5元，20.1万",
    "这是固话0421-33441122",
    "这是手机+86 18544139121",
];

const PINYIN_SAMPLES: &[&str] = &[
    "电影中梁朝伟扮演的陈永仁的编号二七一四九",
    "这块黄金重达三百二十四点七五克",
];

async fn post_sentences(
    client: &reqwest::Client,
    url: &str,
    sentences: &[&str],
) -> Result<serde_json::Value> {
    println!("正在发送请求到: {}", url);

    let response = client
        .post(url)
        .json(&serde_json::json!({ "sentence": sentences }))
        .send()
        .await?;

    let status = response.status();
    println!("✓ 响应状态: {}\n", status);

    if !status.is_success() {
        let error_text = response.text().await?;
        println!("❌ API 错误:\n{}\n", error_text);
        anyhow::bail!("API 请求失败");
    }

    Ok(response.json().await?)
}

/// 打印句子与结果的对应关系
fn print_pairs(body: &serde_json::Value) -> Result<()> {
    let data = &body["data"];
    let sentences = data["sentences"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("响应缺少 sentences 字段"))?;
    let results = data["result"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("响应缺少 result 字段"))?;

    if sentences.len() != results.len() {
        anyhow::bail!(
            "sentences 与 result 长度不一致: {} != {}",
            sentences.len(),
            results.len()
        );
    }

    for (sentence, result) in sentences.iter().zip(results) {
        println!("{}", sentence.as_str().unwrap_or_default());
        println!("  → {}", result);
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    println!("=== Text2Pinyin API 测试工具 ===\n");

    let base_url =
        std::env::var("TEXT2PINYIN_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let base_url = base_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    println!("=== 文本规范化 ===");
    let url = format!("{}/text2pinyin/text-normalize", base_url);
    let body = post_sentences(&client, &url, NORMALIZE_SAMPLES).await?;
    print_pairs(&body)?;

    println!("=== 文本转拼音 ===");
    let url = format!("{}/text2pinyin/text-to-pinyin", base_url);
    let body = post_sentences(&client, &url, PINYIN_SAMPLES).await?;
    print_pairs(&body)?;

    println!("✅ 测试完成");
    Ok(())
}
