use std::env;

fn main() {
    // ビルド時に環境変数を設定
    // 開発環境では .env ファイルを読み込み、コンパイル時の既定値として埋め込む
    let _ = dotenv::dotenv();

    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    println!("cargo:rustc-env=ENVIRONMENT={}", environment);

    // API設定
    let api_server_url =
        env::var("API_SERVER_URL").unwrap_or_else(|_| "http://localhost:5678".to_string());
    let api_timeout = env::var("API_TIMEOUT_SECONDS").unwrap_or_else(|_| "30".to_string());

    println!("cargo:rustc-env=API_SERVER_URL={}", api_server_url);
    println!("cargo:rustc-env=API_TIMEOUT_SECONDS={}", api_timeout);

    // ログレベル
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    println!("cargo:rustc-env=LOG_LEVEL={}", log_level);

    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=API_SERVER_URL");
    println!("cargo:rerun-if-env-changed=ENVIRONMENT");
}
