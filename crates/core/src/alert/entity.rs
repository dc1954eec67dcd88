use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// # Summary
/// 告警的交易方向。TradingView 侧只接受这两个取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    /// 买入
    #[default]
    Buy,
    /// 卖出
    Sell,
}

impl FromStr for OrderAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(OrderAction::Buy),
            "sell" => Ok(OrderAction::Sell),
            _ => Err(format!("Unknown order action: {}", s)),
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderAction::Buy => write!(f, "buy"),
            OrderAction::Sell => write!(f, "sell"),
        }
    }
}

/// # Summary
/// 告警表单的草稿。除 `action` 外所有值在校验前都保持原始文本。
///
/// # Invariants
/// - 只存在于内存中，不做持久化；页面关闭即丢弃。
/// - `action` 由输入端约束为 buy/sell，类型层面不存在第三种取值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFormState {
    /// 交易标的，例如 BTCUSD
    pub symbol: String,
    /// 策略自定义的订单标签，例如 long / short
    pub order_id: String,
    /// 交易方向
    pub action: OrderAction,
    /// 数量（文本形式）
    pub contracts: String,
    /// 价格（文本形式）
    pub price: String,
    /// 备注
    pub comment: String,
}

impl AlertFormState {
    /// # Logic
    /// 以给定的订单标签和方向创建空白表单，其余字段为空字符串。
    pub fn with_defaults(order_id: impl Into<String>, action: OrderAction) -> Self {
        Self {
            symbol: String::new(),
            order_id: order_id.into(),
            action,
            contracts: String::new(),
            price: String::new(),
            comment: String::new(),
        }
    }

    /// 写入一次字段编辑
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Symbol(v) => self.symbol = v,
            FieldEdit::OrderId(v) => self.order_id = v,
            FieldEdit::Action(v) => self.action = v,
            FieldEdit::Contracts(v) => self.contracts = v,
            FieldEdit::Price(v) => self.price = v,
            FieldEdit::Comment(v) => self.comment = v,
        }
    }
}

impl Default for AlertFormState {
    fn default() -> Self {
        Self::with_defaults("long", OrderAction::Buy)
    }
}

/// # Summary
/// 表单输入端发出的单个字段变更事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Symbol(String),
    OrderId(String),
    Action(OrderAction),
    Contracts(String),
    Price(String),
    Comment(String),
}

impl FieldEdit {
    /// 本次编辑影响到的、可能带有校验错误的字段
    pub fn validated_field(&self) -> Option<ValidatedField> {
        match self {
            FieldEdit::Symbol(_) => Some(ValidatedField::Symbol),
            FieldEdit::Contracts(_) => Some(ValidatedField::Contracts),
            FieldEdit::Price(_) => Some(ValidatedField::Price),
            FieldEdit::OrderId(_) | FieldEdit::Action(_) | FieldEdit::Comment(_) => None,
        }
    }

    /// 字段名，用于日志
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldEdit::Symbol(_) => "symbol",
            FieldEdit::OrderId(_) => "order_id",
            FieldEdit::Action(_) => "action",
            FieldEdit::Contracts(_) => "contracts",
            FieldEdit::Price(_) => "price",
            FieldEdit::Comment(_) => "comment",
        }
    }
}

/// # Summary
/// 会参与校验的字段。只有这三个字段可能出现在 [`ValidationErrors`] 中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatedField {
    Symbol,
    Contracts,
    Price,
}

impl fmt::Display for ValidatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatedField::Symbol => write!(f, "symbol"),
            ValidatedField::Contracts => write!(f, "contracts"),
            ValidatedField::Price => write!(f, "price"),
        }
    }
}

/// # Summary
/// 单个字段的校验失败原因。`Display` 即展示给用户的文案。
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Symbol is required")]
    SymbolRequired,
    #[error("Contracts/shares is required")]
    ContractsRequired,
    #[error("Price is required")]
    PriceRequired,
    #[error("Must be a positive number")]
    NotPositive,
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// # Summary
/// 当前处于错误状态的字段集合。
///
/// # Invariants
/// - 键不存在即代表该字段当前有效。
/// - 集合为空是生成告警的唯一前提。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<ValidatedField, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: ValidatedField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: ValidatedField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// 移除单个字段的错误，返回是否确实移除了
    pub fn clear(&mut self, field: ValidatedField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn contains(&self, field: ValidatedField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValidatedField, FieldError)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

/// # Summary
/// 发往外部 webhook 接收端的告警消息。
///
/// # Invariants
/// - 字段声明顺序即 JSON 键顺序，这是与接收端之间的线上契约，不得调整。
/// - `strategy_order_contracts` 与 `strategy_order_price` 为严格正数。
/// - 生成后不可变；每次成功提交都会产生一个全新的实例。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub symbol: String,
    pub strategy_order_id: String,
    pub strategy_order_action: OrderAction,
    #[serde(serialize_with = "serialize_js_number")]
    pub strategy_order_contracts: f64,
    #[serde(serialize_with = "serialize_js_number")]
    pub strategy_order_price: f64,
    pub strategy_order_comment: String,
    /// 生成时刻的毫秒时间戳
    pub time: i64,
}

// 浏览器 JSON.stringify 不会给整数值输出小数部分，这里保持一致：10 而非 10.0
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn serialize_js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        if let Ok(n) = format!("{}", value).parse::<serde_json::Number>() {
            return n.serialize(serializer);
        }
    }
    serializer.serialize_f64(*value)
}
