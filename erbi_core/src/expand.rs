//! `expand`：把逐位候选片段展开成完整编码（笛卡尔积）。

/// 笛卡尔积：第 0 位变化最慢，后面的位依次更快（字典序遍历）。
///
/// - 没有任何位置时返回一个空组合
/// - 任一位置的候选为空时结果为空
pub fn cartesian<T: Clone>(positions: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut out: Vec<Vec<T>> = vec![Vec::with_capacity(positions.len())];
    for candidates in positions {
        if candidates.is_empty() {
            return Vec::new();
        }
        let mut next = Vec::with_capacity(out.len() * candidates.len());
        for prefix in &out {
            for c in candidates {
                let mut combo = prefix.clone();
                combo.push(c.clone());
                next.push(combo);
            }
        }
        out = next;
    }
    out
}

/// 展开并拼接：每个组合按位置顺序直接连接；没有任何位置时结果为空。
pub fn expand<S: AsRef<str> + Clone>(positions: &[Vec<S>]) -> Vec<String> {
    if positions.is_empty() {
        return Vec::new();
    }
    cartesian(positions)
        .into_iter()
        .map(|combo| combo.iter().map(|s| s.as_ref()).collect::<String>())
        .collect()
}
