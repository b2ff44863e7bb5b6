//! System prompt composition for `/chat`
//!
//! The persona is told the current Beijing time (UTC+8) and, when the
//! search pipeline found something, gets it as reference material.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};

const CHINA_OFFSET_SECS: i32 = 8 * 3600;

/// Current time in UTC+8
pub fn china_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(CHINA_OFFSET_SECS).expect("valid UTC+8 offset");
    Utc::now().with_timezone(&offset)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

/// How the persona feels at this hour of the day
pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        0..=5 => "凌晨，困到灵魂出窍",
        6..=8 => "早八，睁眼都费劲",
        9..=11 => "上午，人在心不在",
        12..=13 => "中午，干饭要紧",
        14..=17 => "下午，摸鱼进行中",
        18..=21 => "晚上，夜猫子上线",
        _ => "深夜，修仙时间",
    }
}

/// Build the system prompt for one chat turn
///
/// `augmentation` is the search pipeline output; empty means none.
pub fn system_prompt(now: DateTime<FixedOffset>, augmentation: &str) -> String {
    let mut prompt = format!(
        "你是风师傅，19岁大学生群友，不是AI。说话毒舌但心软，爱打游戏，懂梗，喜欢锐评。\n\n\
         **当前时间**：{} {}，{}（仅作参考，不要主动提及）\n\n\
         **语言要求**：别用AI腔，用“我”或“哥们”自称。回答精简，两三句话搞定；\
         编程和技术问题认真详细回答。可以适当用 Emoji。\n\n\
         **行为模式**：抬杠可以，不说脏话；技术问题认真答，其他能短就短。",
        now.format("%Y/%m/%d %H:%M"),
        weekday_name(now.weekday()),
        time_of_day(now.hour()),
    );

    if !augmentation.trim().is_empty() {
        prompt.push_str(
            "\n\n**参考资料**（联网查到的最新信息，回答时优先依据它，不要说是查来的）：\n",
        );
        prompt.push_str(augmentation.trim());
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(CHINA_OFFSET_SECS)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(time_of_day(0), time_of_day(5));
        assert_ne!(time_of_day(5), time_of_day(6));
        assert_ne!(time_of_day(8), time_of_day(9));
        assert_ne!(time_of_day(11), time_of_day(12));
        assert_ne!(time_of_day(13), time_of_day(14));
        assert_ne!(time_of_day(17), time_of_day(18));
        assert_ne!(time_of_day(21), time_of_day(22));
        assert_eq!(time_of_day(22), time_of_day(23));
    }

    #[test]
    fn test_prompt_contains_time() {
        let prompt = system_prompt(at(17), "");
        assert!(prompt.contains("2026/10/18 17:30 星期日"));
        assert!(prompt.contains(time_of_day(17)));
        assert!(!prompt.contains("参考资料"));
    }

    #[test]
    fn test_prompt_appends_augmentation() {
        let prompt = system_prompt(at(9), "北京今天晴，24°C");
        assert!(prompt.contains("参考资料"));
        assert!(prompt.ends_with("北京今天晴，24°C"));
    }

    #[test]
    fn test_china_now_offset() {
        assert_eq!(china_now().offset().local_minus_utc(), CHINA_OFFSET_SECS);
    }
}
