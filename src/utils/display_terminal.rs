//! 기동 과정 터미널 출력
//!
//! `AppState::build` 가 단계마다 진행 상황을 찍습니다. 로그 레벨과 무관하게 항상 보이도록
//! `println!` 을 씁니다.

/// 번호가 붙은 기동 단계를 순서대로 출력합니다.
#[derive(Debug, Default)]
pub struct StartupProgress {
    step: u8,
    components: usize,
}

impl StartupProgress {
    pub fn new(app_name: &str) -> Self {
        let title = format!("{} bootstrap", app_name);
        let border = "─".repeat(title.chars().count() + 4);
        println!("┌{}┐", border);
        println!("│  {}  │", title);
        println!("└{}┘", border);
        Self::default()
    }

    /// 다음 단계를 시작합니다.
    pub fn begin(&mut self, description: &str) {
        self.step += 1;
        println!("→ [{}] {}", self.step, description);
    }

    pub fn item(&self, name: &str, detail: &str) {
        println!("    · {:<10} {}", name, detail);
    }

    /// 현재 단계를 마치고 만든 컴포넌트 수를 누적합니다.
    pub fn finish(&mut self, created: usize) {
        self.components += created;
        println!("✓ [{}] done ({} components)", self.step, created);
    }

    pub fn ready(self) {
        println!(
            "🎉 ready after {} steps, {} components",
            self.step, self.components
        );
    }

    pub fn components(&self) -> usize {
        self.components
    }
}
