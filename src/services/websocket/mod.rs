/*!
 * WebSocket 实时服务
 *
 * 聊天消息与通知共用一条连接，每个用户一个广播通道。
 *
 * ## 使用方法
 *
 * 客户端通过以下 URL 连接：
 * ```text
 * ws://host/api/v1/ws?token=<access_token>
 * ```
 *
 * ## 消息格式
 *
 * ### 客户端发送
 * ```json
 * {"type": "message", "senderId": 1, "chatRoomId": 2, "content": "hello"}
 * {"type": "ping"}
 * ```
 *
 * ### 服务端推送
 * ```json
 * {"type": "connected", "userId": 1}
 * {"type": "message", "id": 9, "chatRoomId": 2, "senderId": 1, "content": "hello", "timestamp": "..."}
 * {"type": "notification", "payload": { ... }}
 * {"type": "error", "message": "..."}
 * {"type": "pong"}
 * ```
 */

use std::sync::Arc;

use actix_ws::Message;
use dashmap::DashMap;
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::middlewares::RateLimit;
use crate::middlewares::rate_limit::RateDecision;
use crate::models::chat::entities::ChatMessage;
use crate::models::notifications::entities::Notification;
use crate::services::chat::send::deliver_message;
use crate::storage::Storage;

/// 全局连接管理器
static CONNECTION_MANAGER: Lazy<ConnectionManager> =
    Lazy::new(|| ConnectionManager::new(AppConfig::get().chat.channel_capacity));

/// 服务端推送的消息
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WsMessage {
    /// 聊天消息
    Message {
        id: i64,
        chat_room_id: i64,
        sender_id: i64,
        content: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// 通知消息
    Notification { payload: Notification },
    /// 心跳响应
    Pong,
    /// 连接成功
    Connected { user_id: i64 },
    /// 错误消息
    Error { message: String },
}

impl From<ChatMessage> for WsMessage {
    fn from(m: ChatMessage) -> Self {
        WsMessage::Message {
            id: m.id,
            chat_room_id: m.chat_room_id,
            sender_id: m.sender_id,
            content: m.content,
            timestamp: m.timestamp,
        }
    }
}

/// 客户端发送的消息
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientFrame {
    Message {
        #[serde(default)]
        sender_id: Option<i64>,
        chat_room_id: i64,
        content: String,
    },
    Ping,
}

/// 连接管理器
pub struct ConnectionManager {
    /// 用户 ID -> 广播发送器
    connections: DashMap<i64, broadcast::Sender<WsMessage>>,
    capacity: usize,
}

impl ConnectionManager {
    fn new(capacity: usize) -> Self {
        Self {
            connections: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &CONNECTION_MANAGER
    }

    /// 注册用户连接，同一用户的多个连接共享一个通道
    pub fn register(&self, user_id: i64) -> broadcast::Receiver<WsMessage> {
        let entry = self.connections.entry(user_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.capacity);
            tx
        });
        entry.subscribe()
    }

    /// 移除用户连接，仍有订阅者时保留
    pub fn unregister(&self, user_id: i64) {
        self.connections
            .remove_if(&user_id, |_, tx| tx.receiver_count() == 0);
    }

    /// 向指定用户发送消息
    pub fn send_to_user(&self, user_id: i64, message: WsMessage) -> bool {
        match self.connections.get(&user_id) {
            Some(sender) => sender.send(message).is_ok(),
            None => false,
        }
    }

    /// 向多个用户发送消息，返回送达的在线用户数
    pub fn send_to_users(&self, user_ids: &[i64], message: WsMessage) -> usize {
        user_ids
            .iter()
            .filter(|&&user_id| self.send_to_user(user_id, message.clone()))
            .count()
    }

    /// 推送通知给用户
    pub fn push_notification(&self, notification: Notification) -> bool {
        let user_id = notification.user_id;
        self.send_to_user(
            user_id,
            WsMessage::Notification {
                payload: notification,
            },
        )
    }

    /// 获取在线用户数
    pub fn online_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|entry| entry.receiver_count() > 0)
            .count()
    }

    /// 给定用户中在线的人数
    pub fn online_count_in(&self, user_ids: &[i64]) -> usize {
        user_ids.iter().filter(|&&id| self.is_online(id)).count()
    }

    /// 检查用户是否在线
    pub fn is_online(&self, user_id: i64) -> bool {
        self.connections
            .get(&user_id)
            .is_some_and(|s| s.receiver_count() > 0)
    }
}

/// WebSocket 服务
pub struct WebSocketService;

impl WebSocketService {
    /// 处理 WebSocket 连接
    ///
    /// `message_limit` 与 HTTP 发送消息接口共用同一张计数表。
    pub async fn handle_connection(
        user_id: i64,
        storage: Arc<dyn Storage>,
        message_limit: RateLimit,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        info!("WebSocket connected for user: {}", user_id);

        let manager = ConnectionManager::get();
        let mut rx = manager.register(user_id);

        if !send_json(&mut session, &WsMessage::Connected { user_id }).await {
            drop(rx);
            manager.unregister(user_id);
            return;
        }

        let heartbeat_interval =
            std::time::Duration::from_secs(AppConfig::get().chat.heartbeat_interval.max(1));
        let mut heartbeat = tokio::time::interval(heartbeat_interval);

        loop {
            tokio::select! {
                // 客户端消息
                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let reply = match serde_json::from_str::<ClientFrame>(&text) {
                                Ok(frame) => handle_client_frame(user_id, &storage, &message_limit, frame).await,
                                Err(e) => {
                                    debug!("Unreadable frame from user {}: {}", user_id, e);
                                    Some(WsMessage::Error {
                                        message: format!("Invalid message: {e}"),
                                    })
                                }
                            };
                            if let Some(reply) = reply
                                && !send_json(&mut session, &reply).await
                            {
                                break;
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if session.pong(&data).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            info!("WebSocket closed for user: {}", user_id);
                            break;
                        }
                        Some(Err(e)) => {
                            warn!("WebSocket error for user {}: {:?}", user_id, e);
                            break;
                        }
                        _ => {}
                    }
                }

                // 服务端推送
                msg = rx.recv() => {
                    match msg {
                        Ok(ws_msg) => {
                            if !send_json(&mut session, &ws_msg).await {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!("WebSocket for user {} lagged by {} messages", user_id, n);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            break;
                        }
                    }
                }

                // 心跳
                _ = heartbeat.tick() => {
                    if session.ping(b"").await.is_err() {
                        break;
                    }
                }
            }
        }

        // 先释放订阅再清理连接
        drop(rx);
        manager.unregister(user_id);
        let _ = session.close(None).await;
        info!("WebSocket disconnected for user: {}", user_id);
    }
}

async fn send_json(session: &mut actix_ws::Session, message: &WsMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(json) => session.text(json).await.is_ok(),
        Err(e) => {
            warn!("Failed to encode websocket message: {}", e);
            true
        }
    }
}

/// 处理一帧客户端消息，返回需要直接回复给该连接的消息
async fn handle_client_frame(
    user_id: i64,
    storage: &Arc<dyn Storage>,
    message_limit: &RateLimit,
    frame: ClientFrame,
) -> Option<WsMessage> {
    match frame {
        ClientFrame::Ping => Some(WsMessage::Pong),
        ClientFrame::Message {
            sender_id,
            chat_room_id,
            content,
        } => {
            if let Some(sender_id) = sender_id
                && sender_id != user_id
            {
                return Some(WsMessage::Error {
                    message: "senderId does not match the connected user".to_string(),
                });
            }

            if let RateDecision::Limited { retry_after } =
                message_limit.check_user(user_id).await
            {
                return Some(WsMessage::Error {
                    message: format!("Too many messages, retry after {retry_after}s"),
                });
            }

            // 广播会同时送达发送者自己，无需单独回复
            match deliver_message(storage, user_id, chat_room_id, &content).await {
                Ok(_) => None,
                Err(e) => Some(WsMessage::Error {
                    message: e.to_string(),
                }),
            }
        }
    }
}

/// 辅助函数：推送一批通知
pub fn push_notifications(notifications: Vec<Notification>) -> usize {
    let manager = ConnectionManager::get();
    notifications
        .into_iter()
        .filter(|n| manager.is_online(n.user_id))
        .map(|n| manager.push_notification(n))
        .filter(|delivered| *delivered)
        .count()
}

/// 辅助函数：向房间参与者广播聊天消息
pub fn broadcast_chat_message(participants: &[i64], message: ChatMessage) -> usize {
    ConnectionManager::get().send_to_users(participants, WsMessage::from(message))
}

/// 辅助函数：获取在线用户数
pub fn get_online_count() -> usize {
    ConnectionManager::get().online_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::entities::NotificationType;
    use chrono::Utc;

    fn notification(user_id: i64) -> Notification {
        Notification {
            id: 1,
            user_id,
            notification_type: NotificationType::Grade,
            title: "Graded".to_string(),
            message: "Your work was graded".to_string(),
            read: false,
            link: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_client_frame_accepts_camel_case() {
        let frame: ClientFrame = serde_json::from_str(
            r#"{"type":"message","senderId":3,"chatRoomId":7,"content":"hi"}"#,
        )
        .unwrap();
        match frame {
            ClientFrame::Message {
                sender_id,
                chat_room_id,
                content,
            } => {
                assert_eq!(sender_id, Some(3));
                assert_eq!(chat_room_id, 7);
                assert_eq!(content, "hi");
            }
            ClientFrame::Ping => panic!("expected a message frame"),
        }

        let frame: ClientFrame = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Ping));
    }

    #[test]
    fn test_server_message_shape() {
        let json = serde_json::to_value(WsMessage::from(ChatMessage {
            id: 9,
            chat_room_id: 2,
            sender_id: 1,
            content: "hello".to_string(),
            timestamp: Utc::now(),
            read_by: vec![],
        }))
        .unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["chatRoomId"], 2);
        assert_eq!(json["senderId"], 1);

        let json = serde_json::to_value(WsMessage::Connected { user_id: 4 }).unwrap();
        assert_eq!(json["type"], "connected");
        assert_eq!(json["userId"], 4);
    }

    #[tokio::test]
    async fn test_register_send_and_unregister() {
        let manager = ConnectionManager::new(8);
        assert!(!manager.send_to_user(1, WsMessage::Pong));

        let mut rx = manager.register(1);
        assert!(manager.is_online(1));
        assert_eq!(manager.online_count_in(&[1, 2]), 1);

        assert!(manager.push_notification(notification(1)));
        match rx.recv().await.unwrap() {
            WsMessage::Notification { payload } => assert_eq!(payload.user_id, 1),
            other => panic!("unexpected message: {other:?}"),
        }

        // 仍有订阅者时不会移除
        manager.unregister(1);
        assert!(manager.is_online(1));

        drop(rx);
        manager.unregister(1);
        assert!(!manager.is_online(1));
        assert_eq!(manager.online_count(), 0);
    }

    #[tokio::test]
    async fn test_socket_messages_share_http_limit() {
        use crate::storage::memory_storage::test_support::fixture_storage;

        let storage: Arc<dyn Storage> = Arc::new(fixture_storage());
        let limit = RateLimit::new(2, 60).with_prefix("chat");
        let frame = || ClientFrame::Message {
            sender_id: Some(3),
            chat_room_id: 1,
            content: "on my way".to_string(),
        };

        // 先经 HTTP 发送一条
        assert!(matches!(
            limit.check_user(3).await,
            RateDecision::Allowed { remaining: 1 }
        ));
        assert!(handle_client_frame(3, &storage, &limit, frame()).await.is_none());

        match handle_client_frame(3, &storage, &limit, frame()).await {
            Some(WsMessage::Error { message }) => assert!(message.contains("Too many messages")),
            other => panic!("expected a rate limit error, got {other:?}"),
        }
        assert!(matches!(
            limit.check_user(3).await,
            RateDecision::Limited { .. }
        ));
        // 其他用户不受影响
        assert!(matches!(
            limit.check_user(4).await,
            RateDecision::Allowed { .. }
        ));
    }

    #[tokio::test]
    async fn test_send_to_users_counts_online_only() {
        let manager = ConnectionManager::new(8);
        let _a = manager.register(10);
        let _b = manager.register(11);
        assert_eq!(manager.send_to_users(&[10, 11, 12], WsMessage::Pong), 2);
    }
}
