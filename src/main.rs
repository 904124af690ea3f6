// 経費ノートワークフローのエントリーポイント
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let path = std::env::args().nth(1);

    match billed_lib::run(path).await {
        Ok(markup) => {
            println!("{markup}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            e.log("起動エラー");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
