//! 共享测试工具和辅助函数

#![allow(dead_code)]

use mockito::ServerGuard;
use serde_json::{Value, json};
use zone_migrator_provider::{ClientOptions, DigitalOceanProvider};

pub const TEST_TOKEN: &str = "dop_v1_test_token";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 启动一个本地 mock API 服务器
pub async fn mock_server() -> ServerGuard {
    mockito::Server::new_async().await
}

/// 指向 mock 服务器的 provider
pub fn provider_for(server: &ServerGuard) -> DigitalOceanProvider {
    let options = ClientOptions {
        api_base: Some(server.url()),
        ..ClientOptions::default()
    };
    DigitalOceanProvider::with_options(&options).expect("client should build")
}

pub fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

/// `links` 字段，`has_next` 时带下一页链接
pub fn links(has_next: bool, next_page: u32) -> Value {
    if has_next {
        json!({ "pages": { "next": format!("https://api.digitalocean.com/v2/x?page={next_page}") } })
    } else {
        json!({})
    }
}

pub fn droplet_json(id: u64, name: &str, public_v4: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "networks": {
            "v4": [
                { "ip_address": "10.10.0.5", "type": "private" },
                { "ip_address": public_v4, "type": "public" }
            ],
            "v6": []
        }
    })
}

pub fn record_json(id: u64, record_type: &str, name: &str, data: &str) -> Value {
    json!({
        "id": id,
        "type": record_type,
        "name": name,
        "data": data,
        "priority": null,
        "port": null,
        "ttl": 1800,
        "weight": null
    })
}
