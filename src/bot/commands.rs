//! Command table
//!
//! Maps each slash-command, in its Latin and Cyrillic spelling, to its canned
//! HTML reply.

const HELP: &str = r#"БОТ РАБОТАЕТ ТОЛЬКО У АДМИНОВ.

Команды можно писать обычным сообщением и ответом на сообщение.

Список доступных команд:
[<code>/help</code>, <code>/хелп</code>] Список доступных команд бота
[<code>/php</code>, <code>/пхп</code>] @phpGeeks - Best PHP chat
[<code>/jun</code>, <code>/джун</code>] @phpGeeksJunior - Группа для новичков. Не стесняйтесь задавать вопросы по php.
[<code>/go</code>, <code>/го</code>] @golangGeeks - Приветствуем всех в нашем гетеросексуальном чате гоферов!
[<code>/db</code>, <code>/дб</code>] @dbGeeks - Чат про базы данных, их устройство и приемы работы с ними.
[<code>/lara</code>, <code>/лара</code>] @laravel_pro - Официальный чат для всех Laravel программистов.
[<code>/js</code>, <code>/жс</code>] @jsChat - Чат посвященный программированию на языке JavaScript.
[<code>/hr</code>, <code>/хр</code>] @jobGeeks - Топ вакансии (250 000+ р/мес).
[<code>/fl</code>, <code>/фл</code>] @freelanceGeeks - IT фриланс, ищем исполнителей и заказчиков, делимся опытом и проблемами связанными с фрилансом.
[<code>/job</code>, <code>/раб</code>] Объединяет сразу две команды: <code>/hr</code> и <code>/fl</code>.
[<code>/code</code>, <code>/код</code>] Код в нашем чате <a href="https://t.me/phpGeeks/1318040">ложут</a> на pastebin.org, gist.github.com или любой аналогичный ресурс (с)der_Igel
[<code>/nometa</code>, <code>/номета</code>] nometa.xyz
[<code>/wtf</code>, <code>/втф</code>] А причём тут пхп?"#;

const PHP: &str = "@phpGeeks - Best PHP chat";
const JUNIOR: &str =
    "@phpGeeksJunior - Группа для новичков. Не стесняйтесь задавать вопросы по php.";
const GO: &str = "@golangGeeks - Приветствуем всех в нашем гетеросексуальном чате гоферов!";
const DB: &str = "@dbGeeks - Чат про базы данных, их устройство и приемы работы с ними.";
const LARAVEL: &str = "@laravel_pro - Официальный чат для всех Laravel программистов.";
const JS: &str = "@jsChat - Чат посвященный программированию на языке JavaScript.";
const HR: &str = "@jobGeeks - Топ вакансии (250 000+ р/мес).";
const FREELANCE: &str = "@freelanceGeeks - IT фриланс, ищем исполнителей и заказчиков, делимся опытом и проблемами связанными с фрилансом.";
const JOB: &str = "@jobGeeks - Топ вакансии (250 000+ р/мес).
@freelanceGeeks - IT фриланс, ищем исполнителей и заказчиков, делимся опытом и проблемами связанными с фрилансом.";
const CODE: &str = r#"Код в нашем чате <a href="https://t.me/phpGeeks/1318040">ложут</a> на pastebin.org, gist.github.com или любой аналогичный ресурс (с)der_Igel"#;
const NOMETA: &str = "nometa.xyz";
const WTF: &str = "А причём тут пхп?";

/// Returns the reply for an exact command match, or `None` for any other text.
pub fn reply_for(text: &str) -> Option<&'static str> {
    let reply = match text {
        "/help" | "/хелп" => HELP,
        "/php" | "/пхп" => PHP,
        "/jun" | "/джун" => JUNIOR,
        "/go" | "/го" => GO,
        // Help advertises /дб; /бд is kept for users who learned it
        "/db" | "/дб" | "/бд" => DB,
        "/lara" | "/лара" => LARAVEL,
        "/js" | "/жс" => JS,
        "/hr" | "/хр" => HR,
        "/fl" | "/фл" => FREELANCE,
        "/job" | "/раб" => JOB,
        "/code" | "/код" => CODE,
        "/nometa" | "/номета" => NOMETA,
        "/wtf" | "/втф" => WTF,
        _ => return None,
    };

    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_and_cyrillic_spellings_match() {
        let pairs = [
            ("/help", "/хелп"),
            ("/php", "/пхп"),
            ("/jun", "/джун"),
            ("/go", "/го"),
            ("/db", "/дб"),
            ("/lara", "/лара"),
            ("/js", "/жс"),
            ("/hr", "/хр"),
            ("/fl", "/фл"),
            ("/job", "/раб"),
            ("/code", "/код"),
            ("/nometa", "/номета"),
            ("/wtf", "/втф"),
        ];

        for (latin, cyrillic) in pairs {
            let reply = reply_for(latin);
            assert!(reply.is_some(), "{latin} should be a command");
            assert_eq!(reply, reply_for(cyrillic), "{latin} and {cyrillic} differ");
        }
    }

    #[test]
    fn test_job_combines_hr_and_fl() {
        let job = reply_for("/job").unwrap();
        assert!(job.contains(HR));
        assert!(job.contains(FREELANCE));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = reply_for("/help").unwrap();
        for command in ["/php", "/jun", "/go", "/db", "/lara", "/js", "/hr", "/fl", "/job", "/code", "/nometa", "/wtf"] {
            assert!(help.contains(&format!("<code>{command}</code>")), "{command} missing");
        }
    }

    #[test]
    fn test_unknown_text() {
        assert_eq!(reply_for(""), None);
        assert_eq!(reply_for("hello"), None);
        assert_eq!(reply_for("/php please"), None);
        assert_eq!(reply_for("/PHP"), None);
    }
}
