//! 语句拼接：所有片段之间用单个空格分隔。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；如果不是首次写入，会先写入一个空格。空片段忽略。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    /// 依次 `write_leading` 每个片段。
    pub(crate) fn write_all(&mut self, items: &[String]) {
        for s in items {
            self.write_leading(s);
        }
    }

    /// `a.x,a.y,...`
    pub(crate) fn write_qualified(&mut self, table: &str, columns: &[String]) {
        let qualified: Vec<String> = columns.iter().map(|c| format!("{table}.{c}")).collect();
        self.write_leading(&qualified.join(","));
    }

    /// `t(a,b) VALUES (:a,:b)`
    pub(crate) fn write_named_values(&mut self, table: &str, columns: &[String]) {
        let named: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
        self.write_leading(&format!(
            "{table}({}) VALUES ({})",
            columns.join(","),
            named.join(",")
        ));
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
