//! 时间戳兼容层
//!
//! 线上与备份文件里的 `createdAt` 历史上有两种写法：
//! epoch 毫秒数（JS `Date.now()`）或 RFC 3339 字符串。
//! 读取时两种都接受，写出时统一为 RFC 3339

/// 供 `#[serde(with = "epoch_or_rfc3339")]` 使用
pub mod epoch_or_rfc3339 {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        EpochMillis(i64),
        Text(String),
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::EpochMillis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| serde::de::Error::custom(format!("epoch 毫秒数越界: {}", ms))),
            Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super::epoch_or_rfc3339")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_deserialize_epoch_millis() {
        let stamped: Stamped = serde_json::from_str(r#"{"at":1700000000000}"#).unwrap();
        assert_eq!(stamped.at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_deserialize_rfc3339() {
        let stamped: Stamped = serde_json::from_str(r#"{"at":"2024-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(stamped.at.timestamp(), 1_704_164_645);
    }

    #[test]
    fn test_serialize_is_rfc3339() {
        let stamped: Stamped = serde_json::from_str(r#"{"at":1700000000000}"#).unwrap();
        let json = serde_json::to_string(&stamped).unwrap();
        assert!(json.contains("2023-11-14T22:13:20"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at":"昨天"}"#).is_err());
    }
}
