//! 발송 이메일 종류와 언어별 제목/본문

use crate::domain::entities::users::Language;

/// 서비스가 보내는 이메일. 템플릿에 들어갈 데이터를 함께 가집니다.
#[derive(Debug, Clone, PartialEq)]
pub enum EmailMessage {
    Welcome { name: String },
    Confirmation { link: String },
}

impl EmailMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            EmailMessage::Welcome { .. } => "welcome",
            EmailMessage::Confirmation { .. } => "confirmation",
        }
    }

    pub fn subject(&self, language: Language) -> &'static str {
        match (self, language) {
            (EmailMessage::Welcome { .. }, Language::En) => "Welcome to Closi!",
            (EmailMessage::Welcome { .. }, Language::Uk) => "Ласкаво просимо до Closi!",
            (EmailMessage::Welcome { .. }, Language::De) => "Willkommen bei Closi!",
            (EmailMessage::Welcome { .. }, Language::Pl) => "Witamy w Closi!",
            (EmailMessage::Welcome { .. }, Language::Ru) => "Добро пожаловать в Closi!",
            (EmailMessage::Confirmation { .. }, Language::En) => "Email confirmation",
            (EmailMessage::Confirmation { .. }, Language::Uk) => "Підтвердження електронної пошти",
            (EmailMessage::Confirmation { .. }, Language::De) => "E-Mail-Bestätigung",
            (EmailMessage::Confirmation { .. }, Language::Pl) => "Potwierdzenie adresu e-mail",
            (EmailMessage::Confirmation { .. }, Language::Ru) => {
                "Подтверждение электронной почты"
            }
        }
    }

    /// 공통 레이아웃에 본문을 끼워 넣은 HTML
    pub fn render_html(&self, language: Language) -> String {
        let content = match self {
            EmailMessage::Welcome { name } => {
                format!("<p>{}, {}!</p>", greeting(language), escape_html(name))
            }
            EmailMessage::Confirmation { link } => {
                let link = escape_html(link);
                format!(
                    "<p>{}</p><p><a href=\"{link}\">{link}</a></p>",
                    confirmation_hint(language)
                )
            }
        };

        format!(
            "<!DOCTYPE html><html lang=\"{}\"><head><meta charset=\"utf-8\"><title>{}</title></head>\
             <body><h1>Closi</h1>{}</body></html>",
            language.as_str(),
            self.subject(language),
            content
        )
    }
}

fn greeting(language: Language) -> &'static str {
    match language {
        Language::En => "Hello",
        Language::Uk => "Вітаємо",
        Language::De => "Hallo",
        Language::Pl => "Cześć",
        Language::Ru => "Здравствуйте",
    }
}

fn confirmation_hint(language: Language) -> &'static str {
    match language {
        Language::En => "Follow the link to confirm your email address:",
        Language::Uk => "Перейдіть за посиланням, щоб підтвердити адресу:",
        Language::De => "Folgen Sie dem Link, um Ihre E-Mail-Adresse zu bestätigen:",
        Language::Pl => "Kliknij link, aby potwierdzić adres e-mail:",
        Language::Ru => "Перейдите по ссылке, чтобы подтвердить адрес:",
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
