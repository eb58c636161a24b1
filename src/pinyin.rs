//! 标识符音译
//!
//! 将中文标识符确定性地转换为合法的 ASCII 目标语言标识符：
//! 逐字查拼音、首字母大写后拼接（驼峰），ASCII 字母数字下划线原样保留，
//! 查不到拼音的汉字退化为 `U` 加十六进制码点，其余字符一律剥离。
//! 结果为空或不以字母开头时加前缀哨兵字母 `Z`。
//! 纯函数，无任何跨调用状态；同一输入在任何时刻产生相同输出。
//! 多音字固定取表中的一个读音，保证确定性优先于读音准确。

/// 音译一个标识符
pub fn transliterate(name: &str) -> String {
    let mut out = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if let Some(py) = char_pinyin(c) {
            let mut chars = py.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        } else if is_cjk(c) {
            // 表外汉字：确定性退化，保持可逆查错
            out.push_str(&format!("U{:X}", c as u32));
        }
        // 其余字符在目标语言标识符中非法，剥离
    }
    if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        out.insert(0, 'Z');
    }
    out
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32, 0x3400..=0x4DBF | 0x4E00..=0x9FFF)
}

/// 单字拼音表
///
/// 覆盖合约代码里常见的汉字；不求全，求稳定。
fn char_pinyin(c: char) -> Option<&'static str> {
    let py = match c {
        // 数字
        '一' => "yi",
        '二' => "er",
        '三' => "san",
        '四' => "si",
        '五' => "wu",
        '六' => "liu",
        '七' => "qi",
        '八' => "ba",
        '九' => "jiu",
        '十' => "shi",
        '百' => "bai",
        '千' => "qian",
        '万' => "wan",
        '亿' => "yi",
        '零' => "ling",
        '甲' => "jia",
        '乙' => "yi",
        '丙' => "bing",
        // 语言结构相关
        '合' => "he",
        '约' => "yue",
        '函' => "han",
        '构' => "gou",
        '造' => "zao",
        '事' => "shi",
        '件' => "jian",
        '返' => "fan",
        '回' => "hui",
        '如' => "ru",
        '果' => "guo",
        '否' => "fou",
        '则' => "ze",
        '当' => "dang",
        '循' => "xun",
        '环' => "huan",
        '要' => "yao",
        '求' => "qiu",
        '触' => "chu",
        '发' => "fa",
        '映' => "ying",
        '射' => "she",
        '公' => "gong",
        '开' => "kai",
        '私' => "si",
        '内' => "nei",
        '外' => "wai",
        '部' => "bu",
        '只' => "zhi",
        '读' => "du",
        '纯' => "chun",
        '支' => "zhi",
        '付' => "fu",
        '整' => "zheng",
        '符' => "fu",
        '串' => "chuan",
        '节' => "jie",
        '布' => "bu",
        '尔' => "er",
        '真' => "zhen",
        '假' => "jia",
        '参' => "can",
        '变' => "bian",
        '量' => "liang",
        '类' => "lei",
        '型' => "xing",
        '局' => "ju",
        '全' => "quan",
        // 常用动词
        '转' => "zhuan",
        '查' => "cha",
        '询' => "xun",
        '获' => "huo",
        '得' => "de",
        '设' => "she",
        '置' => "zhi",
        '更' => "geng",
        '改' => "gai",
        '修' => "xiu",
        '增' => "zeng",
        '减' => "jian",
        '加' => "jia",
        '乘' => "cheng",
        '除' => "chu",
        '删' => "shan",
        '存' => "cun",
        '取' => "qu",
        '提' => "ti",
        '授' => "shou",
        '批' => "pi",
        '准' => "zhun",
        '允' => "yun",
        '许' => "xu",
        '铸' => "zhu",
        '销' => "xiao",
        '毁' => "hui",
        '暂' => "zan",
        '停' => "ting",
        '恢' => "hui",
        '复' => "fu",
        '验' => "yan",
        '证' => "zheng",
        '检' => "jian",
        '判' => "pan",
        '断' => "duan",
        '比' => "bi",
        '较' => "jiao",
        '计' => "ji",
        '算' => "suan",
        '执' => "zhi",
        '运' => "yun",
        '行' => "xing",
        '注' => "zhu",
        '册' => "ce",
        '登' => "deng",
        '录' => "lu",
        '退' => "tui",
        '进' => "jin",
        '出' => "chu",
        '入' => "ru",
        '申' => "shen",
        '请' => "qing",
        '审' => "shen",
        '核' => "he",
        '确' => "que",
        '认' => "ren",
        '通' => "tong",
        '过' => "guo",
        '拒' => "ju",
        '绝' => "jue",
        '锁' => "suo",
        '定' => "ding",
        '解' => "jie",
        '释' => "shi",
        '放' => "fang",
        '购' => "gou",
        '买' => "mai",
        '卖' => "mai",
        '售' => "shou",
        '捐' => "juan",
        '赠' => "zeng",
        '投' => "tou",
        '票' => "piao",
        '选' => "xuan",
        '排' => "pai",
        '序' => "xu",
        '统' => "tong",
        '签' => "qian",
        '名' => "ming",
        '报' => "bao",
        '告' => "gao",
        // 金融/合约领域
        '币' => "bi",
        '代' => "dai",
        '余' => "yu",
        '额' => "e",
        '账' => "zhang",
        '户' => "hu",
        '金' => "jin",
        '钱' => "qian",
        '款' => "kuan",
        '费' => "fei",
        '利' => "li",
        '率' => "lv",
        '价' => "jia",
        '格' => "ge",
        '资' => "zi",
        '产' => "chan",
        '交' => "jiao",
        '易' => "yi",
        '市' => "shi",
        '场' => "chang",
        '拍' => "pai",
        '竞' => "jing",
        '抵' => "di",
        '押' => "ya",
        '借' => "jie",
        '贷' => "dai",
        '还' => "huan",
        '债' => "zhai",
        '众' => "zhong",
        '筹' => "chou",
        '供' => "gong",
        '应' => "ying",
        '总' => "zong",
        '初' => "chu",
        '始' => "shi",
        '终' => "zhong",
        '期' => "qi",
        '限' => "xian",
        '订' => "ding",
        '单' => "dan",
        '商' => "shang",
        '品' => "pin",
        '库' => "ku",
        '银' => "yin",
        '奖' => "jiang",
        '励' => "li",
        '彩' => "cai",
        '捷' => "jie",
        '赢' => "ying",
        '输' => "shu",
        // 人与角色
        '人' => "ren",
        '者' => "zhe",
        '员' => "yuan",
        '主' => "zhu",
        '管' => "guan",
        '理' => "li",
        '用' => "yong",
        '家' => "jia",
        '候' => "hou",
        '玩' => "wan",
        '接' => "jie",
        '收' => "shou",
        '送' => "song",
        '持' => "chi",
        '拥' => "yong",
        '有' => "you",
        '所' => "suo",
        // 消息/区块链
        '消' => "xiao",
        '息' => "xi",
        '区' => "qu",
        '块' => "kuai",
        '链' => "lian",
        '哈' => "ha",
        '希' => "xi",
        '密' => "mi",
        '钥' => "yao",
        '地' => "di",
        '址' => "zhi",
        '时' => "shi",
        '间' => "jian",
        '戳' => "chuo",
        '高' => "gao",
        '度' => "du",
        // 状态与属性
        '状' => "zhuang",
        '态' => "tai",
        '标' => "biao",
        '志' => "zhi",
        '值' => "zhi",
        '数' => "shu",
        '据' => "ju",
        '信' => "xin",
        '记' => "ji",
        '列' => "lie",
        '表' => "biao",
        '组' => "zu",
        '集' => "ji",
        '键' => "jian",
        '项' => "xiang",
        '条' => "tiao",
        '目' => "mu",
        '描' => "miao",
        '述' => "shu",
        '容' => "rong",
        '长' => "chang",
        '宽' => "kuan",
        '次' => "ci",
        '每' => "mei",
        '个' => "ge",
        '第' => "di",
        '最' => "zui",
        '新' => "xin",
        '旧' => "jiu",
        '大' => "da",
        '小' => "xiao",
        '低' => "di",
        '多' => "duo",
        '少' => "shao",
        '空' => "kong",
        '满' => "man",
        '正' => "zheng",
        '负' => "fu",
        '奇' => "qi",
        '偶' => "ou",
        '双' => "shuang",
        '半' => "ban",
        '先' => "xian",
        '后' => "hou",
        '前' => "qian",
        '上' => "shang",
        '下' => "xia",
        '中' => "zhong",
        '末' => "mo",
        '重' => "chong",
        // 常用字
        '的' => "de",
        '了' => "le",
        '在' => "zai",
        '到' => "dao",
        '从' => "cong",
        '向' => "xiang",
        '给' => "gei",
        '被' => "bei",
        '并' => "bing",
        '或' => "huo",
        '与' => "yu",
        '和' => "he",
        '非' => "fei",
        '不' => "bu",
        '未' => "wei",
        '已' => "yi",
        '可' => "ke",
        '能' => "neng",
        '无' => "wu",
        '是' => "shi",
        '为' => "wei",
        '于' => "yu",
        '之' => "zhi",
        '其' => "qi",
        '此' => "ci",
        '该' => "gai",
        '本' => "ben",
        '我' => "wo",
        '你' => "ni",
        '他' => "ta",
        '器' => "qi",
        '共' => "gong",
        '识' => "shi",
        '成' => "cheng",
        '功' => "gong",
        '失' => "shi",
        '败' => "bai",
        '错' => "cuo",
        '误' => "wu",
        '完' => "wan",
        '结' => "jie",
        '束' => "shu",
        '等' => "deng",
        '级' => "ji",
        '测' => "ce",
        '试' => "shi",
        '示' => "shi",
        '例' => "li",
        '温' => "wen",
        '学' => "xue",
        '生' => "sheng",
        '老' => "lao",
        '师' => "shi",
        '称' => "cheng",
        '号' => "hao",
        '字' => "zi",
        '文' => "wen",
        '任' => "ren",
        '务' => "wu",
        '工' => "gong",
        '作' => "zuo",
        '年' => "nian",
        '月' => "yue",
        '日' => "ri",
        '天' => "tian",
        '秒' => "miao",
        '分' => "fen",
        '点' => "dian",
        '角' => "jiao",
        '元' => "yuan",
        '树' => "shu",
        '游' => "you",
        '戏' => "xi",
        '积' => "ji",
        '启' => "qi",
        '闭' => "bi",
        '白' => "bai",
        '黑' => "hei",
        '红' => "hong",
        '包' => "bao",
        _ => return None,
    };
    Some(py)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_concatenation() {
        assert_eq!(transliterate("总供应量"), "ZongGongYingLiang");
        assert_eq!(transliterate("余额"), "YuE");
        assert_eq!(transliterate("转账"), "ZhuanZhang");
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(transliterate("balance"), "balance");
        assert_eq!(transliterate("数值2"), "ShuZhi2");
        assert_eq!(transliterate("my_余额"), "my_YuE");
    }

    #[test]
    fn test_deterministic() {
        let a = transliterate("查询余额");
        let b = transliterate("查询余额");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sentinel_prefix() {
        // 以数字开头的标识符补前缀
        assert_eq!(transliterate("123"), "Z123");
        // 全部字符无效时退化为单个哨兵字母
        assert_eq!(transliterate("···"), "Z");
    }

    #[test]
    fn test_unmapped_cjk_fallback() {
        // 表外生僻字退化为码点形式
        let out = transliterate("龘");
        assert!(out.starts_with('U'), "unexpected: {}", out);
        assert_eq!(out, format!("U{:X}", '龘' as u32));
    }

    #[test]
    fn test_invalid_symbols_stripped() {
        assert_eq!(transliterate("余额！"), "YuE");
    }
}
