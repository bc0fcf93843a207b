// ==========================================
// 缺陷分派系统 - 有序容器（二叉搜索树）
// ==========================================
// 职责: 按注入的全序比较器维护元素顺序
// 支持: 插入 / 按值删除 / 可重启的中序遍历
// 红线: 不做平衡; 退化形状可接受, 但所有操作必须迭代实现, 不得递归爆栈
// ==========================================

use std::cmp::Ordering;
use std::fmt;
use std::mem;

// ==========================================
// Comparator - 全序比较器
// ==========================================
// 用途: 容器不写死比较规则, 由调用方注入
// 实现者: NaturalOrder, 闭包, 领域比较器（如 SeverityOrder）
pub trait Comparator<T> {
    /// 比较两个值
    ///
    /// 必须是全序: 自反、反对称、传递
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// 按 `T: Ord` 的自然顺序比较
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
}

// ==========================================
// OrderedTree - 有序容器
// ==========================================
// 不变式:
// - 左子树 < 节点 <= 右子树（相等值一律进入右子树）
// - 中序遍历按比较器非递减
// - 相等值按插入顺序排列, 删除时总是先删中序最靠前的一个
pub struct OrderedTree<T, C> {
    root: Link<T>,
    len: usize,
    comparator: C,
}

impl<T, C> OrderedTree<T, C>
where
    C: Comparator<T>,
{
    /// 以指定比较器创建空容器
    pub fn new(comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
        }
    }

    /// 元素个数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 当前使用的比较器
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// 插入一个值
    ///
    /// 与已有值比较相等时不会覆盖, 作为独立节点挂到右侧,
    /// 因此相等值之间保持插入顺序。
    pub fn insert(&mut self, value: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match self.comparator.compare(&value, &node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Node::leaf(value));
        self.len += 1;
    }

    /// 删除一个与 `value` 比较相等的值, 返回被删除的值
    ///
    /// 相等值有多个时, 删除下降路径上遇到的第一个,
    /// 也就是中序遍历中最靠前的那个; 恰好删除一个。
    ///
    /// # 返回
    /// - Some(T): 被删除的值（所有权归还调用方）
    /// - None: 容器中没有相等值
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let mut link = &mut self.root;

        // 1) 定位匹配节点所在的链接
        loop {
            let ordering = match link.as_ref() {
                None => return None,
                Some(node) => self.comparator.compare(value, &node.value),
            };
            if ordering == Ordering::Equal {
                break;
            }
            link = match (ordering, link) {
                (Ordering::Less, Some(node)) => &mut node.left,
                (_, Some(node)) => &mut node.right,
                (_, None) => return None,
            };
        }

        // 2) 三种情形摘除节点
        let mut node = link.take()?;
        let removed = match (node.left.take(), node.right.take()) {
            (None, None) => node.value,
            (Some(child), None) | (None, Some(child)) => {
                *link = Some(child);
                node.value
            }
            (left, right) => {
                // 双子节点: 用中序后继替换, 再摘除后继
                node.left = left;
                node.right = right;
                match Self::detach_min(&mut node.right) {
                    Some(successor) => {
                        let removed = mem::replace(&mut node.value, successor);
                        *link = Some(node);
                        removed
                    }
                    None => {
                        *link = Some(node);
                        return None;
                    }
                }
            }
        };

        self.len -= 1;
        Some(removed)
    }

    /// 是否包含与 `value` 比较相等的值
    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.comparator.compare(value, &node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// 最小值（中序第一个）
    pub fn first(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.value)
    }

    /// 中序遍历
    ///
    /// 迭代器借用容器; 遍历期间容器不可变更。
    /// 每次调用都从头开始, 反映容器当前内容。
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// 树高（空树为 0）
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|node| [node.left.as_deref(), node.right.as_deref()])
                .flatten()
                .collect();
        }
        height
    }

    /// 清空容器
    pub fn clear(&mut self) {
        drop_nodes(self.root.take());
        self.len = 0;
    }

    /// 摘除以 `link` 为根的子树中的最小节点, 返回其值
    fn detach_min(link: &mut Link<T>) -> Option<T> {
        let mut link = link;
        while link.as_ref().is_some_and(|node| node.left.is_some()) {
            link = match link {
                Some(node) => &mut node.left,
                None => return None,
            };
        }
        let min = link.take()?;
        let Node { value, right, .. } = *min;
        *link = right;
        Some(value)
    }
}

/// 逐个释放节点
///
/// 默认析构会沿链表形状的退化树递归。
fn drop_nodes<T>(root: Link<T>) {
    let mut pending: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

impl<T, C> Default for OrderedTree<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T, C> Drop for OrderedTree<T, C> {
    fn drop(&mut self) {
        drop_nodes(self.root.take());
    }
}

impl<T, C> Extend<T> for OrderedTree<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedTree<T, C>
where
    C: Comparator<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for OrderedTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ==========================================
// Iter - 中序迭代器
// ==========================================
// 显式栈保存尚未访问的祖先节点, 不依赖递归
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
