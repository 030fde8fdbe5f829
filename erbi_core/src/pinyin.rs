use crate::error::ErbiResult;

/// 拼音服务：把一段文本转成逐字拼音（已消歧，一字一个音节）。
///
/// 返回的音节数应与字数一致；不一致时由取码规则判定为输入错误。
pub trait PinyinProvider: Send + Sync {
    fn pinyin_of(&self, text: &str) -> ErbiResult<Vec<String>>;
}

impl<P: PinyinProvider + ?Sized> PinyinProvider for &P {
    fn pinyin_of(&self, text: &str) -> ErbiResult<Vec<String>> {
        (**self).pinyin_of(text)
    }
}
