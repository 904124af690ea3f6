use crate::shared::errors::{AppError, AppResult};
use std::path::PathBuf;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境変数取得エラー
#[derive(Debug, Clone)]
pub struct EnvVarError {
    /// 変数名
    pub var_name: String,
    /// エラーメッセージ
    pub message: String,
}

impl std::fmt::Display for EnvVarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "環境変数 {} が見つかりません: {}",
            self.var_name, self.message
        )
    }
}

impl std::error::Error for EnvVarError {}

/// 環境変数を取得する（優先順位: 起動時 > コンパイル時 > エラー）
///
/// # 取得順序
/// 1. 起動時の環境変数（`std::env::var`）
/// 2. コンパイル時の環境変数（`option_env!`マクロ、`build.rs` が設定）
/// 3. どちらも見つからない場合はエラー
#[macro_export]
macro_rules! get_env_var {
    ($var_name:expr) => {{
        if let Ok(value) = std::env::var($var_name) {
            log::debug!("環境変数 {} を起動時の環境変数から取得しました", $var_name);
            Ok(value)
        } else if let Some(value) = option_env!($var_name) {
            log::debug!("環境変数 {} をコンパイル時の環境変数から取得しました", $var_name);
            Ok(value.to_string())
        } else {
            Err($crate::shared::config::environment::EnvVarError {
                var_name: $var_name.to_string(),
                message: format!(
                    "起動時の環境変数 {} もコンパイル時の環境変数も見つかりませんでした",
                    $var_name
                ),
            })
        }
    }};
}

/// 環境変数を取得する（デフォルト値付き）
#[macro_export]
macro_rules! get_env_var_or_default {
    ($var_name:expr, $default_value:expr) => {{
        $crate::get_env_var!($var_name).unwrap_or_else(|_| {
            log::debug!(
                "環境変数 {} が見つからないため、デフォルト値を使用します: {}",
                $var_name,
                $default_value
            );
            $default_value.to_string()
        })
    }};
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            debug_mode,
            log_level,
        }
    }

    /// プロダクション環境かどうかを判定
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 開発環境かどうかを判定
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// ログレベル文字列をフィルターに変換する
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境変数を読み込む
///
/// 開発環境（デバッグビルド）の場合のみ.envファイルを読み込む。
/// ログシステム初期化前に呼ばれるため、出力は標準エラーに直接書く。
pub fn load_environment_variables() {
    if cfg!(debug_assertions) {
        eprintln!("開発環境: .envファイルを読み込みます");

        match dotenv::dotenv() {
            Ok(path) => {
                eprintln!("環境ファイルを読み込みました: {}", path.display());
            }
            Err(e) => {
                eprintln!("環境ファイルの読み込みに失敗: {e}");
            }
        }
    } else {
        eprintln!("本番環境: 環境変数は実行時に設定されます");
    }
}

/// ログシステムを初期化する
///
/// 二回目以降の呼び出しは何もしない。
pub fn initialize_logging_system() {
    let env_config = EnvironmentConfig::from_env();

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(env_config.level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok();

    if initialized {
        log::info!(
            "ログシステムを初期化しました: level={}, environment={}",
            env_config.log_level,
            env_config.environment
        );
    }
}

/// API設定を管理する構造体
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// APIサーバーのベースURL
    pub base_url: String,
    /// APIリクエストのタイムアウト（秒）
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5678".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ApiConfig {
    /// 環境変数からAPI設定を読み込む
    pub fn from_env() -> Self {
        let base_url = crate::get_env_var_or_default!("API_SERVER_URL", "http://localhost:5678");

        let timeout_seconds = crate::get_env_var_or_default!("API_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or_else(|_| {
                log::warn!(
                    "API_TIMEOUT_SECONDSのパースに失敗しました。デフォルト値30秒を使用します"
                );
                30
            });

        log::info!("API設定: base_url={base_url}, timeout={timeout_seconds}s");

        Self {
            base_url,
            timeout_seconds,
        }
    }

    /// 設定を検証する
    ///
    /// # 戻り値
    /// 設定が有効な場合はOk(())、無効な場合はErr
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.is_empty() {
            return Err(AppError::configuration(
                "APIサーバーのベースURLが設定されていません",
            ));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            AppError::configuration(format!("APIサーバーのURLが不正です: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::configuration(format!(
                "APIサーバーのURLはhttpまたはhttpsである必要があります: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "APIタイムアウトは0より大きい値である必要があります",
            ));
        }

        Ok(())
    }

    /// 末尾のスラッシュを除いたベースURL
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1")
    }
}

/// 実行環境とAPIサーバーの組み合わせを確認する
///
/// # 戻り値
/// 本番環境でlocalhostのAPIサーバーを指している場合はfalse
pub fn check_api_target(env_config: &EnvironmentConfig, api_config: &ApiConfig) -> bool {
    if env_config.is_production() && api_config.is_localhost() {
        log::warn!(
            "本番環境でlocalhostのAPIサーバーが設定されています: {}",
            api_config.base_url
        );
        return false;
    }
    if env_config.is_development() && !api_config.is_localhost() {
        log::info!("開発環境で外部のAPIサーバーを使用します: {}", api_config.base_url);
    }
    true
}

/// セッションストアの保存先を決定する
///
/// `SESSION_STORE_PATH` が設定されていればそれを使い、
/// なければデータディレクトリ配下の `billed/store.json` を使う。
pub fn session_store_path() -> AppResult<PathBuf> {
    if let Ok(path) = std::env::var("SESSION_STORE_PATH") {
        log::debug!("セッションストアのパスを環境変数から取得しました: {path}");
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_dir().ok_or_else(|| {
        AppError::configuration("データディレクトリを特定できませんでした")
    })?;
    Ok(data_dir.join("billed").join("store.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_equality() {
        assert_eq!(Environment::Development, Environment::Development);
        assert_ne!(Environment::Development, Environment::Production);
    }

    #[test]
    fn test_get_environment() {
        let env = get_environment();
        assert!(matches!(
            env,
            Environment::Development | Environment::Production
        ));
    }

    #[test]
    fn test_environment_config_methods() {
        let dev_config = EnvironmentConfig {
            environment: "development".to_string(),
            debug_mode: true,
            log_level: "debug".to_string(),
        };

        let prod_config = EnvironmentConfig {
            environment: "production".to_string(),
            debug_mode: false,
            log_level: "WARN".to_string(),
        };

        assert!(dev_config.is_development());
        assert!(!dev_config.is_production());
        assert_eq!(dev_config.level_filter(), log::LevelFilter::Debug);

        assert!(prod_config.is_production());
        assert_eq!(prod_config.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            debug_mode: true,
            log_level: "verbose".to_string(),
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_api_config_validate() {
        assert!(ApiConfig::default().validate().is_ok());

        let empty = ApiConfig {
            base_url: String::new(),
            timeout_seconds: 30,
        };
        assert!(matches!(empty.validate(), Err(AppError::Configuration(_))));

        let ftp = ApiConfig {
            base_url: "ftp://example.com".to_string(),
            timeout_seconds: 30,
        };
        assert!(ftp.validate().is_err());

        let zero_timeout = ApiConfig {
            base_url: "http://localhost:5678".to_string(),
            timeout_seconds: 0,
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_api_config_normalized_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:5678/".to_string(),
            timeout_seconds: 30,
        };
        assert_eq!(config.normalized_base_url(), "http://localhost:5678");
        assert!(config.is_localhost());
    }

    #[test]
    fn test_check_api_target() {
        let prod = EnvironmentConfig {
            environment: "production".to_string(),
            debug_mode: false,
            log_level: "info".to_string(),
        };
        let dev = EnvironmentConfig {
            environment: "development".to_string(),
            debug_mode: true,
            log_level: "debug".to_string(),
        };
        let local = ApiConfig::default();
        let remote = ApiConfig {
            base_url: "https://api.billed.example".to_string(),
            timeout_seconds: 30,
        };

        assert!(!check_api_target(&prod, &local));
        assert!(check_api_target(&prod, &remote));
        assert!(check_api_target(&dev, &local));
        assert!(check_api_target(&dev, &remote));
    }

    #[test]
    fn test_initialize_logging_system_twice() {
        // 二回呼んでもパニックしない
        initialize_logging_system();
        initialize_logging_system();
    }
}
