// ==========================================
// 缺陷分派系统 - 容器层
// ==========================================
// 职责: 领域无关的泛型容器
// - OrderedTree: 注入比较器的二叉搜索树
// - SequentialList: 只追加的顺序列表
// 红线: 不含任何缺陷/开发者概念
// ==========================================

pub mod ordered_tree;
pub mod sequential_list;

pub use ordered_tree::{Comparator, Iter, NaturalOrder, OrderedTree};
pub use sequential_list::SequentialList;
