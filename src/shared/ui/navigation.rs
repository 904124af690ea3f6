use super::routes::Route;
use tokio::sync::mpsc;

/// 画面遷移サービス
///
/// コントローラーは遷移を要求するだけで、画面の入れ替えはルーターが行う。
pub trait NavigationService: Send + Sync {
    /// 指定したルートへの遷移を要求する
    fn on_navigate(&self, route: Route);
}

/// 遷移要求をキューに積むナビゲーター
#[derive(Debug, Clone)]
pub struct Navigator {
    sender: mpsc::UnboundedSender<Route>,
}

impl Navigator {
    /// ナビゲーターと遷移要求の受信側を作成する
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NavigationService for Navigator {
    fn on_navigate(&self, route: Route) {
        log::info!("画面遷移を要求: path={}", route.path());
        if self.sender.send(route).is_err() {
            log::warn!("遷移要求の受信側が破棄されています: path={}", route.path());
        }
    }
}
